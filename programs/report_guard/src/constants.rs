// Centralized Protocol Constants

// PDA seeds
// =========

pub const CONFIG_SEED: &[u8] = b"config_v1";
pub const REPORT_REGISTRY_SEED: &[u8] = b"report_registry_v1";
pub const COMMITTEE_SEED: &[u8] = b"committee_v1";
pub const STAKE_VAULT_SEED: &[u8] = b"stake_vault_v1";

pub const ASSET_SEED: &[u8] = b"asset_v1";
pub const EXEMPT_SEED: &[u8] = b"exempt_v1";
pub const FLAG_SEED: &[u8] = b"flag_v1";

pub const REPORT_SEED: &[u8] = b"report_v1";
pub const REPORT_VAULT_SEED: &[u8] = b"report_vault_v1";
pub const STAKE_SEED: &[u8] = b"stake_v1";
pub const COMPENSATION_SEED: &[u8] = b"compensation_v1";

// Limits
// ======

/// Upper bound on committee size. Also bounds the ballot list stored in each report,
/// keeping the Report account size deterministic.
pub const MAX_COMMITTEE_MEMBERS: usize = 16;

/// Percentages are whole numbers out of this base.
pub const PERCENT_BASE: u64 = 100;

// Defaults
// ========

/// Report lifetime in seconds (1 day).
pub const DEFAULT_REPORT_LIFETIME_SECS: i64 = 86_400;

/// Window after a wallet proposal during which voting blocs may reject it (7 days).
pub const DEFAULT_DISPUTE_PERIOD_SECS: i64 = 604_800;

/// Default fee charged to open a report, in staking token base units.
pub const DEFAULT_REPORT_STAKE: u64 = 2_500;

/// Default deposit for a third-party stake on a report.
pub const DEFAULT_STAKING_AMOUNT: u64 = 1_000;

/// Default share of the reporter's forfeited stake paid to a wrongly flagged account.
pub const DEFAULT_COMPENSATION_PCT: u8 = 2;

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;

/// First report id handed out by a fresh registry.
pub const INITIAL_REPORT_ID: u64 = 1;
