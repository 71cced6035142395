use std::net::IpAddr;

use sysinfo::Networks;

use super::IfaceAddr;

/// IPv4 address for each tracked interface. An interface that is down,
/// unknown or v6-only reads as present with no address.
pub fn addresses(tracked: &[String]) -> Vec<IfaceAddr> {
    let networks = Networks::new_with_refreshed_list();
    tracked
        .iter()
        .map(|name| IfaceAddr {
            name: name.clone(),
            ipv4: first_ipv4(&networks, name),
        })
        .collect()
}

fn first_ipv4(networks: &Networks, name: &str) -> Option<std::net::Ipv4Addr> {
    let (_, data) = networks.iter().find(|(iface, _)| iface.as_str() == name)?;
    data.ip_networks().iter().find_map(|net| match net.addr {
        IpAddr::V4(addr) => Some(addr),
        IpAddr::V6(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_interface_reads_as_absent_address() {
        let readings = addresses(&["does-not-exist0".to_string()]);
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].name, "does-not-exist0");
        assert_eq!(readings[0].ipv4, None);
    }

    #[test]
    fn every_tracked_interface_gets_an_entry() {
        let tracked = vec!["eth0".to_string(), "wlan0".to_string()];
        assert_eq!(addresses(&tracked).len(), 2);
    }
}
