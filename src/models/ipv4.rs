//! IPv4 address, netmask and CIDR notation utilities.
//!
//! Provides [`Ipv4`] for a network address with its prefix length, and
//! [`Netmask`] for a dotted-decimal mask that is known to be contiguous.

use std::error::Error;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use foxfunx::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Parse a dotted-decimal IPv4 address.
///
/// Exactly four decimal groups in `0..=255` are accepted. IPv6 text,
/// IPv4-mapped IPv6 and surrounding whitespace are rejected.
pub fn parse_ipv4(input: &str) -> Option<Ipv4Addr> {
    Ipv4Addr::from_str(input).ok()
}

/// Count the leading 1-bits of `mask`, or `None` when a 1-bit follows a 0-bit.
pub fn prefix_len(mask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(mask);
    let ones = bits.leading_ones() as u8;
    // leading_ones alone would accept 255.0.255.0 as /8
    match get_cidr_mask(ones) {
        Ok(expected) if expected == bits => Some(ones),
        _ => None,
    }
}

/// Network address of `addr` under `mask`: each octet ANDed with the mask octet.
pub fn network_addr(addr: Ipv4Addr, mask: Netmask) -> Ipv4Addr {
    let a = addr.octets();
    let m = mask.addr().octets();
    Ipv4Addr::new(a[0] & m[0], a[1] & m[1], a[2] & m[2], a[3] & m[3])
}

/// A netmask made of leading 1-bits followed only by 0-bits.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub struct Netmask {
    addr: Ipv4Addr,
    len: u8,
}

impl Netmask {
    /// Validate `addr` as a contiguous netmask.
    pub fn from_addr(addr: Ipv4Addr) -> Option<Netmask> {
        prefix_len(addr).map(|len| Netmask { addr, len })
    }

    /// Build the netmask for a prefix length (0-32).
    #[cfg(test)]
    pub fn from_prefix_len(len: u8) -> Result<Netmask, Box<dyn Error>> {
        let bits = get_cidr_mask(len)?;
        Ok(Netmask {
            addr: Ipv4Addr::from(bits),
            len,
        })
    }

    /// The mask in dotted-decimal form.
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    /// Number of leading 1-bits.
    pub fn prefix_len(&self) -> u8 {
        self.len
    }
}

/// IPv4 network address with CIDR notation support.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 network address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Ipv4 {
    /// Mask `addr` with `netmask`, dropping the host bits.
    pub fn from_subnet(addr: Ipv4Addr, netmask: Netmask) -> Ipv4 {
        Ipv4 {
            addr: network_addr(addr, netmask),
            mask: netmask.prefix_len(),
        }
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
