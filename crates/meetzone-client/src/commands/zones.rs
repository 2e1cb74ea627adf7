//! Zones command.

use std::io::Write;

use meetzone_core::{BASE_TIMEZONES, city_label};

use crate::error::ClientResult;

/// Print the base time zones with their display labels.
pub fn list() -> ClientResult<()> {
    write_zones(&mut std::io::stdout().lock())
}

/// Writes one `Area/City  label` line per base zone.
pub fn write_zones(out: &mut impl Write) -> ClientResult<()> {
    for zone in BASE_TIMEZONES {
        writeln!(out, "{:<24} {}", zone, city_label(zone))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_zone_has_a_label() {
        let mut out = Vec::new();
        write_zones(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), BASE_TIMEZONES.len());
        let buenos_aires = text
            .lines()
            .find(|line| line.starts_with("America/Buenos_Aires"))
            .unwrap();
        assert!(buenos_aires.ends_with(" Buenos Aires"));
    }
}
