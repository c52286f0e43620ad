use alloy::primitives::Address;

use crate::PoolEvent;

/// Decides whether a decoded pool is in scope for the monitor.
///
/// Pure function of the event and the configured target hook. With no target configured, every
/// pool matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HookFilter {
    target: Option<Address>,
}

impl HookFilter {
    #[must_use]
    pub fn new(target: Option<Address>) -> Self {
        Self { target }
    }

    #[must_use]
    pub fn is_match(&self, event: &PoolEvent) -> bool {
        match self.target {
            None => true,
            Some(target) => event.hooks == target,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use alloy::primitives::{B256, U160, address};
    use chrono::Utc;

    use super::*;

    fn event_with_hooks(hooks: Address) -> PoolEvent {
        PoolEvent {
            id: B256::ZERO,
            currency0: address!("0x1111111111111111111111111111111111111111"),
            currency1: address!("0x2222222222222222222222222222222222222222"),
            fee: 500.try_into().unwrap(),
            tick_spacing: 10.try_into().unwrap(),
            hooks,
            sqrt_price_x96: U160::from(1u8),
            tick: 0.try_into().unwrap(),
            observed_at: Utc::now(),
        }
    }

    #[test]
    fn unset_target_matches_everything() {
        let filter = HookFilter::default();

        assert!(filter.is_match(&event_with_hooks(Address::ZERO)));
        assert!(filter.is_match(&event_with_hooks(address!(
            "0x3333333333333333333333333333333333333333"
        ))));
    }

    #[test]
    fn target_matches_only_its_hook() {
        let hook = address!("0x3333333333333333333333333333333333333333");
        let filter = HookFilter::new(Some(hook));

        assert!(filter.is_match(&event_with_hooks(hook)));
        assert!(!filter.is_match(&event_with_hooks(Address::ZERO)));
        assert!(!filter.is_match(&event_with_hooks(address!(
            "0x4444444444444444444444444444444444444444"
        ))));
    }

    #[test]
    fn hex_casing_does_not_affect_matching() {
        let checksummed = Address::from_str("0xAbCdEf0123456789abcdef0123456789ABCDEF01").unwrap();
        let lower = Address::from_str("0xabcdef0123456789abcdef0123456789abcdef01").unwrap();
        let filter = HookFilter::new(Some(checksummed));

        assert!(filter.is_match(&event_with_hooks(lower)));
    }
}
