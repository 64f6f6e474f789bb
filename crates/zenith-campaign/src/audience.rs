// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Audience segmentation over decoded client records.
//!
//! Segments are pure status predicates; resolution is deterministic and
//! preserves source order, so a mission's recipient sequence is exactly
//! the sheet's row order.

use std::str::FromStr;

use strum::{Display, EnumString};

use zenith_core::types::{Client, OrderStatus};

/// Audience segment vocabulary. Unknown ids parse to `All` so a stale
/// saved selection can never empty an audience silently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Segment {
    #[default]
    All,
    New,
    Pending,
    Confirmed,
    Delivered,
}

impl Segment {
    /// Parse a segment id, falling back to `All` for unknown input.
    pub fn parse_lenient(input: &str) -> Self {
        Segment::from_str(input.trim()).unwrap_or_default()
    }

    fn matches(&self, client: &Client) -> bool {
        match self {
            Segment::All => true,
            Segment::New => client.status == OrderStatus::New,
            Segment::Pending => client.status == OrderStatus::Pending,
            Segment::Confirmed => client.status == OrderStatus::Confirmed,
            Segment::Delivered => client.status == OrderStatus::Delivered,
        }
    }
}

/// Filter clients down to a segment, keeping source order.
pub fn resolve(segment: Segment, clients: &[Client]) -> Vec<Client> {
    clients
        .iter()
        .filter(|c| segment.matches(c))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(name: &str, status: OrderStatus) -> Client {
        Client {
            client: name.to_string(),
            phone: "212600000000".to_string(),
            city: String::new(),
            address: String::new(),
            items: String::new(),
            qty: 1,
            price: 100.0,
            status,
            note: String::new(),
            date: String::new(),
        }
    }

    #[test]
    fn all_is_identity() {
        let clients = vec![
            client("a", OrderStatus::New),
            client("b", OrderStatus::Cancelled),
        ];
        let resolved = resolve(Segment::All, &clients);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].client, "a");
        assert_eq!(resolved[1].client, "b");
    }

    #[test]
    fn status_segments_filter_in_order() {
        let clients = vec![
            client("a", OrderStatus::Confirmed),
            client("b", OrderStatus::New),
            client("c", OrderStatus::Confirmed),
        ];
        let resolved = resolve(Segment::Confirmed, &clients);
        let names: Vec<_> = resolved.iter().map(|c| c.client.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn unknown_segment_parses_to_all() {
        assert_eq!(Segment::parse_lenient("vip_customers"), Segment::All);
        assert_eq!(Segment::parse_lenient("confirmed"), Segment::Confirmed);
        assert_eq!(Segment::parse_lenient(" NEW "), Segment::New);
    }

    #[test]
    fn resolution_is_deterministic() {
        let clients = vec![
            client("a", OrderStatus::New),
            client("b", OrderStatus::New),
        ];
        assert_eq!(resolve(Segment::New, &clients), resolve(Segment::New, &clients));
    }
}
