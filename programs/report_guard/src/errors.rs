use anchor_lang::prelude::*;

#[error_code]
pub enum ReportGuardError {
    // -----------------
    // Caller is not allowed to act
    // -----------------
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Caller is not a committee member")]
    NotCommitteeMember,
    #[msg("Caller is not the reporter of this report")]
    NotReporter,
    #[msg("Caller has no stake on this report")]
    NotStaker,
    #[msg("Caller is not the proposed wallet")]
    NotProposedWallet,
    #[msg("Caller is not the owed party")]
    NotOwedParty,

    // -----------------
    // Report target
    // -----------------
    #[msg("Account cannot be reported")]
    InvalidTarget,
    #[msg("Account is exempt from reporting")]
    ExemptTarget,
    #[msg("Reporter cannot target or stake on its own report")]
    SelfReport,
    #[msg("Wallet cannot be the zero address")]
    ZeroWallet,
    #[msg("Flagged accounts cannot stake")]
    StakerFlagged,

    // -----------------
    // Second attempt at a one-shot action
    // -----------------
    #[msg("Already voted")]
    AlreadyVoted,
    #[msg("Already staked on this report")]
    AlreadyStaked,
    #[msg("Already claimed")]
    AlreadyClaimed,
    #[msg("Report already extended")]
    AlreadyExtended,
    #[msg("Wallet already proposed")]
    WalletAlreadyProposed,
    #[msg("Already rejected this proposal")]
    AlreadyRejected,
    #[msg("An open report already exists for this account")]
    ReportAlreadyOpen,
    #[msg("Account already confirmed malicious")]
    AlreadyConfirmed,
    #[msg("Frozen funds already released")]
    FundsAlreadyReleased,
    #[msg("Funds already retrieved")]
    FundsAlreadyRetrieved,
    #[msg("Committee member already exists")]
    CommitteeMemberExists,

    // -----------------
    // Lookups
    // -----------------
    #[msg("Report not found")]
    ReportNotFound,
    #[msg("Committee member not found")]
    CommitteeMemberNotFound,

    // -----------------
    // Report / protocol state
    // -----------------
    #[msg("Report already solved")]
    AlreadySolved,
    #[msg("Report not resolved")]
    NotResolved,
    #[msg("Report not resolved as malicious")]
    NotConfirmed,
    #[msg("Report lifetime elapsed")]
    ReportExpired,
    #[msg("Blocs disagree, a third vote is needed")]
    NeedsTieBreak,
    #[msg("Not enough blocs voted")]
    InsufficientVotes,
    #[msg("Dispute period still open")]
    DisputeWindowOpen,
    #[msg("Dispute period closed")]
    DisputeWindowClosed,
    #[msg("Proposed wallet was rejected")]
    WalletRejected,
    #[msg("No wallet proposed")]
    NoProposedWallet,
    #[msg("Frozen funds not released yet")]
    FundsNotReleased,
    #[msg("Protocol paused")]
    Paused,
    #[msg("Nothing owed")]
    NothingOwed,
    #[msg("Reward percentages exceed 100")]
    InvalidPercentages,
    #[msg("Invalid committee quorum")]
    InvalidQuorum,
    #[msg("Committee is full")]
    CommitteeFull,
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Invalid window")]
    InvalidWindow,
    #[msg("Token account mint does not match the report asset")]
    MintMismatch,
    #[msg("Config PDA must be the asset's freeze authority")]
    FreezeAuthorityMismatch,
    #[msg("Math overflow")]
    MathOverflow,

    // -----------------
    // Value transfer
    // -----------------
    #[msg("Insufficient funds")]
    InsufficientFunds,
}
