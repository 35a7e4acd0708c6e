//! Site filter: joins raw outages against a site's device list.

use std::collections::HashMap;

use crate::models::{Device, Outage, Site, SiteOutage};

/// Returns the outages that affect `site` and began at or after `cutoff`.
///
/// `cutoff` is compared lexicographically against each outage's `begin`,
/// which matches chronological order for the upstream timestamp format.
/// Output order follows input order. When several devices share an id,
/// the first one in `site.devices` supplies the name.
pub fn filter_for_site(outages: &[Outage], site: &Site, cutoff: &str) -> Vec<SiteOutage> {
    let mut devices: HashMap<&str, &Device> = HashMap::with_capacity(site.devices.len());
    for device in &site.devices {
        devices.entry(device.id.as_str()).or_insert(device);
    }

    outages
        .iter()
        .filter(|outage| outage.begin.as_str() >= cutoff)
        .filter_map(|outage| {
            devices
                .get(outage.id.as_str())
                .map(|device| SiteOutage::from_outage(outage, device))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUTOFF: &str = "2022-01-01T00:00:00.000Z";

    fn site(devices: Vec<Device>) -> Site {
        Site {
            id: "norwich-pear-tree".to_string(),
            name: "Norwich Pear Tree".to_string(),
            devices,
        }
    }

    #[test]
    fn test_begin_equal_to_cutoff_is_kept() {
        let outages = vec![Outage::new("a", CUTOFF, "2022-02-01T00:00:00.000Z")];
        let site = site(vec![Device::new("a", "Battery 1")]);

        assert_eq!(filter_for_site(&outages, &site, CUTOFF).len(), 1);
    }

    #[test]
    fn test_one_millisecond_before_cutoff_is_dropped() {
        let outages = vec![Outage::new(
            "a",
            "2021-12-31T23:59:59.999Z",
            "2022-02-01T00:00:00.000Z",
        )];
        let site = site(vec![Device::new("a", "Battery 1")]);

        assert!(filter_for_site(&outages, &site, CUTOFF).is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(filter_for_site(&[], &site(vec![Device::new("a", "x")]), CUTOFF).is_empty());

        let outages = vec![Outage::new("a", "2022-03-01T00:00:00.000Z", "2022-03-02T00:00:00.000Z")];
        assert!(filter_for_site(&outages, &site(vec![]), CUTOFF).is_empty());
    }

    #[test]
    fn test_duplicate_device_ids_first_wins() {
        let outages = vec![Outage::new("a", "2022-03-01T00:00:00.000Z", "2022-03-02T00:00:00.000Z")];
        let site = site(vec![
            Device::new("a", "Battery 1"),
            Device::new("a", "Battery 1 (spare)"),
        ]);

        let result = filter_for_site(&outages, &site, CUTOFF);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Battery 1");
    }

    #[test]
    fn test_multiple_outages_for_one_device_all_kept_in_order() {
        let outages = vec![
            Outage::new("a", "2022-05-01T00:00:00.000Z", "2022-05-02T00:00:00.000Z"),
            Outage::new("b", "2022-04-01T00:00:00.000Z", "2022-04-02T00:00:00.000Z"),
            Outage::new("a", "2022-03-01T00:00:00.000Z", "2022-03-02T00:00:00.000Z"),
        ];
        let site = site(vec![Device::new("a", "Battery 1")]);

        let result = filter_for_site(&outages, &site, CUTOFF);
        let begins: Vec<&str> = result.iter().map(|o| o.begin.as_str()).collect();
        assert_eq!(begins, ["2022-05-01T00:00:00.000Z", "2022-03-01T00:00:00.000Z"]);
    }
}
