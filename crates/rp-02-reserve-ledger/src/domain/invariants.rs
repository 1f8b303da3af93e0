//! Ledger invariants
//!
//! Checked on demand through `ReserveLedger::check_invariants`.

use super::state::{ExitQuote, ReserveState};
use shared_types::Amount;

/// INVARIANT-1: Share Conservation
/// Shares are only minted and burned through the ledger, so the token's
/// total supply equals the ledger's share supply exactly.
pub fn invariant_share_conservation(state: &ReserveState, token_total_supply: Amount) -> bool {
    state.total_share_supply == token_total_supply
}

/// INVARIANT-2: Custody Coverage
/// Custody holds at least the liquid (non-invested) reserve.
pub fn invariant_custody_covers_liquid(state: &ReserveState, custody_balance: Amount) -> bool {
    custody_balance >= state.liquid()
}

/// INVARIANT-3: Invested Within Reserve
/// The invested portion never exceeds the total reserve balance.
pub fn invariant_invested_within_reserve(state: &ReserveState) -> bool {
    state.invested_balance <= state.total_reserve_balance
}

/// INVARIANT-4: No Orphaned Reserve
/// Reserve with no shares behind it would go to the next entrant. The
/// converse (shares over a fully lost reserve) is allowed.
pub fn invariant_no_orphaned_reserve(state: &ReserveState) -> bool {
    state.total_share_supply > 0 || state.total_reserve_balance == 0
}

/// INVARIANT-5: Split Conservation
/// `user + pool == total` for every exit quote.
pub fn invariant_split_conservation(quote: &ExitQuote) -> bool {
    quote.user.checked_add(quote.pool) == Some(quote.total)
}

/// Violated invariant names, empty when all hold.
pub fn violations(
    state: &ReserveState,
    token_total_supply: Amount,
    custody_balance: Amount,
) -> Vec<&'static str> {
    let mut violated = Vec::new();
    if !invariant_share_conservation(state, token_total_supply) {
        violated.push("share_conservation");
    }
    if !invariant_custody_covers_liquid(state, custody_balance) {
        violated.push("custody_covers_liquid");
    }
    if !invariant_invested_within_reserve(state) {
        violated.push("invested_within_reserve");
    }
    if !invariant_no_orphaned_reserve(state) {
        violated.push("orphaned_reserve");
    }
    violated
}
