use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ReportGuardError;
use crate::utils::{percent_of, stake_weight, total_stake_weight, weighted_share, RewardPools};

// ----------------------------
// Protocol configuration
// ----------------------------

/// Reward split applied to a confirmed report's frozen balance.
/// Whatever the four shares leave over is retrievable by the treasury wallet.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct RewardPercents {
    pub reporter: u8,
    pub team: u8,
    pub committee: u8,
    pub staker: u8,
}

impl RewardPercents {
    pub fn total(&self) -> u64 {
        self.reporter as u64 + self.team as u64 + self.committee as u64 + self.staker as u64
    }

    pub fn validate(&self) -> Result<()> {
        require!(self.total() <= PERCENT_BASE, ReportGuardError::InvalidPercentages);
        Ok(())
    }
}

/// Amounts and windows applied to newly created reports.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportSettings {
    pub report_stake: u64,
    pub staking_amount: u64,
    pub report_lifetime: i64,
    pub dispute_period: i64,
    pub compensation_pct: u8,
}

impl ReportSettings {
    pub fn validate(&self) -> Result<()> {
        require!(self.report_stake > 0, ReportGuardError::InvalidAmount);
        require!(self.staking_amount > 0, ReportGuardError::InvalidAmount);
        require!(self.report_lifetime > 0, ReportGuardError::InvalidWindow);
        require!(self.dispute_period > 0, ReportGuardError::InvalidWindow);
        require!(
            self.compensation_pct as u64 <= PERCENT_BASE,
            ReportGuardError::InvalidPercentages
        );
        Ok(())
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            report_stake: DEFAULT_REPORT_STAKE,
            staking_amount: DEFAULT_STAKING_AMOUNT,
            report_lifetime: DEFAULT_REPORT_LIFETIME_SECS,
            dispute_period: DEFAULT_DISPUTE_PERIOD_SECS,
            compensation_pct: DEFAULT_COMPENSATION_PCT,
        }
    }
}

#[account]
#[derive(InitSpace)]
pub struct Config {
    /// Operating team. Casts the team vote and receives the team share.
    pub admin: Pubkey,
    pub recovery_admin: Pubkey,
    pub pause_admin: Pubkey,
    pub bump: u8,
    pub paused: bool,

    // Staking token (report fee, third-party stakes, compensation)
    pub stake_mint: Pubkey,
    pub stake_vault: Pubkey,
    pub stake_vault_bump: u8,

    pub rewards: RewardPercents,
    pub compensation_pct: u8,
    pub report_stake: u64,
    pub staking_amount: u64,
    pub report_lifetime: i64,
    pub dispute_period: i64,

    /// Bumped on every reward/settings update; recorded in each report's terms.
    pub config_version: u32,

    /// Stake forfeited by negatively resolved reports, net of compensation.
    pub forfeited_balance: u64,

    pub version: u16,
}

impl Config {
    pub fn apply_settings(&mut self, settings: &ReportSettings) {
        self.report_stake = settings.report_stake;
        self.staking_amount = settings.staking_amount;
        self.report_lifetime = settings.report_lifetime;
        self.dispute_period = settings.dispute_period;
        self.compensation_pct = settings.compensation_pct;
    }

    pub fn bump_config_version(&mut self) -> Result<()> {
        self.config_version = self
            .config_version
            .checked_add(1)
            .ok_or(ReportGuardError::MathOverflow)?;
        Ok(())
    }

    pub fn snapshot_terms(&self) -> ReportTerms {
        ReportTerms {
            config_version: self.config_version,
            rewards: self.rewards,
            compensation_pct: self.compensation_pct,
            report_stake: self.report_stake,
            staking_amount: self.staking_amount,
            dispute_period: self.dispute_period,
        }
    }
}

/// Configuration captured when a report is created. Later config updates never
/// change the payout math of a report that already exists.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct ReportTerms {
    pub config_version: u32,
    pub rewards: RewardPercents,
    pub compensation_pct: u8,
    pub report_stake: u64,
    pub staking_amount: u64,
    pub dispute_period: i64,
}

#[account]
#[derive(InitSpace)]
pub struct ReportRegistry {
    pub admin: Pubkey,
    pub bump: u8,
    pub next_report_id: u64,
    pub version: u16,
}

#[account]
#[derive(InitSpace, Default)]
pub struct Committee {
    pub admin: Pubkey,
    pub bump: u8,

    /// Ballots required before the committee's aggregated vote counts.
    pub quorum: u8,

    #[max_len(16)]
    pub members: Vec<Pubkey>,

    pub version: u16,
}

impl Committee {
    pub fn is_member(&self, who: &Pubkey) -> bool {
        self.members.contains(who)
    }

    /// Seats the initial membership. An empty committee is allowed; members can be
    /// added later, but the quorum must already be reachable once seats exist.
    pub fn seat(&mut self, members: Vec<Pubkey>, quorum: u8) -> Result<()> {
        require!(members.len() <= MAX_COMMITTEE_MEMBERS, ReportGuardError::CommitteeFull);
        for (i, member) in members.iter().enumerate() {
            require!(*member != Pubkey::default(), ReportGuardError::ZeroWallet);
            require!(
                !members[..i].contains(member),
                ReportGuardError::CommitteeMemberExists
            );
        }
        self.members = members;
        self.set_quorum(quorum)
    }

    pub fn add_member(&mut self, member: Pubkey) -> Result<()> {
        require!(member != Pubkey::default(), ReportGuardError::ZeroWallet);
        require!(!self.is_member(&member), ReportGuardError::CommitteeMemberExists);
        require!(self.members.len() < MAX_COMMITTEE_MEMBERS, ReportGuardError::CommitteeFull);
        self.members.push(member);
        Ok(())
    }

    /// Drops a seat. The quorum follows the committee down so it stays reachable.
    /// Ballots already cast on reports are kept and still claimable.
    pub fn remove_member(&mut self, member: Pubkey) -> Result<()> {
        let pos = self
            .members
            .iter()
            .position(|m| *m == member)
            .ok_or(ReportGuardError::CommitteeMemberNotFound)?;
        self.members.remove(pos);
        if (self.quorum as usize) > self.members.len() {
            self.quorum = (self.members.len() as u8).max(1);
        }
        Ok(())
    }

    pub fn set_quorum(&mut self, quorum: u8) -> Result<()> {
        require!(quorum > 0, ReportGuardError::InvalidQuorum);
        require!(
            (quorum as usize) <= self.members.len().max(1),
            ReportGuardError::InvalidQuorum
        );
        self.quorum = quorum;
        Ok(())
    }
}

/// A monitored asset and the identity acting as its token owner.
#[account]
#[derive(InitSpace)]
pub struct AssetProfile {
    pub mint: Pubkey,
    pub token_owner: Pubkey,
    pub bump: u8,
    pub registered_at: i64,
}

/// Addresses that cannot be reported (exchange and liquidity accounts).
#[account]
#[derive(InitSpace)]
pub struct Exemption {
    pub address: Pubkey,
    pub exempt: bool,
    pub bump: u8,
}

// ----------------------------
// Freeze predicate
// ----------------------------

/// Freeze state of one (asset, account) pair. The token layer consults
/// `blocks_transfers` before letting the account move funds.
#[account]
#[derive(InitSpace, Default)]
pub struct FlagRecord {
    pub asset: Pubkey,
    pub account: Pubkey,
    pub token_account: Pubkey,
    pub report_id: u64,
    pub expires_at: i64,
    pub active: bool,
    pub confirmed: bool,
    pub bump: u8,
}

impl FlagRecord {
    pub fn held_by_open_report(&self, now: i64) -> bool {
        self.active && now < self.expires_at
    }

    pub fn blocks_transfers(&self, now: i64) -> bool {
        self.confirmed || self.held_by_open_report(now)
    }

    pub fn check_reportable(&self, now: i64) -> Result<()> {
        require!(!self.confirmed, ReportGuardError::AlreadyConfirmed);
        require!(!self.held_by_open_report(now), ReportGuardError::ReportAlreadyOpen);
        Ok(())
    }

    /// Hands the flag to `report_id`. An expired holder loses it here and will
    /// not thaw the account when it is finally resolved.
    pub fn take(
        &mut self,
        asset: Pubkey,
        account: Pubkey,
        token_account: Pubkey,
        report_id: u64,
        expires_at: i64,
        bump: u8,
    ) {
        self.asset = asset;
        self.account = account;
        self.token_account = token_account;
        self.report_id = report_id;
        self.expires_at = expires_at;
        self.active = true;
        self.confirmed = false;
        self.bump = bump;
    }

    pub fn is_held_by(&self, report_id: u64) -> bool {
        self.report_id == report_id
    }

    /// Applies a resolution. Returns true when the caller must thaw the token account.
    pub fn settle(&mut self, report_id: u64, outcome: bool) -> bool {
        if !self.is_held_by(report_id) {
            return false;
        }
        self.active = false;
        if outcome {
            self.confirmed = true;
            false
        } else {
            true
        }
    }
}

// ----------------------------
// Reports
// ----------------------------

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct Ballot {
    pub member: Pubkey,
    pub vote: bool,
    pub claimed: bool,
}

/// How the three voting blocs currently stand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlocTally {
    /// Two agreeing blocs, or a 2-of-3 majority.
    Decided(bool),
    /// Exactly two blocs voted and they disagree.
    Split,
    /// Fewer than two blocs voted.
    Undecided,
}

impl BlocTally {
    pub fn from_votes(team: Option<bool>, owner: Option<bool>, committee: Option<bool>) -> Self {
        let cast: Vec<bool> = [team, owner, committee].into_iter().flatten().collect();
        match cast.as_slice() {
            [a, b, c] => Self::Decided(u8::from(*a) + u8::from(*b) + u8::from(*c) >= 2),
            [a, b] if a == b => Self::Decided(*a),
            [_, _] => Self::Split,
            _ => Self::Undecided,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportStatus {
    Open,
    AwaitingTieBreak,
    Expired,
    Resolved(bool),
}

/// Voting bloc rejecting a proposed treasury wallet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalletRejector {
    Team,
    Owner,
    Committee(Pubkey),
}

#[account]
#[derive(InitSpace, Default)]
pub struct Report {
    pub id: u64,
    pub bump: u8,

    pub asset: Pubkey,
    pub reporter: Pubkey,
    pub primary_account: Pubkey,
    pub primary_token_account: Pubkey,
    pub secondary_account: Option<Pubkey>,
    pub secondary_token_account: Option<Pubkey>,

    // Asset vault receiving the frozen balance on confirmation
    pub vault: Pubkey,
    pub vault_bump: u8,

    pub created_at: i64,
    pub lifetime_end: i64,
    pub terms: ReportTerms,

    /// Balance of the flagged token account(s) captured when they were frozen.
    pub frozen_balance: u64,

    // ===== voting =====
    pub team_vote: Option<bool>,
    pub owner_vote: Option<bool>,
    pub committee_quorum: u8,
    /// Committee bloc vote, fixed once quorum first yields a strict majority.
    pub committee_vote: Option<bool>,
    #[max_len(16)]
    pub ballots: Vec<Ballot>,

    // ===== stakes =====
    pub staker_count: u32,
    pub staked_at_sum: i64,

    // ===== resolution =====
    pub resolved: bool,
    pub outcome: bool,
    pub resolved_at: i64,
    pub funds_released: bool,

    // claim guards
    pub reporter_claimed: bool,
    pub reporter_refunded: bool,
    pub team_claimed: bool,

    // ===== treasury wallet =====
    pub proposed_wallet: Option<Pubkey>,
    pub wallet_proposed_at: i64,
    pub wallet_rejected: bool,
    pub team_rejected_wallet: bool,
    pub owner_rejected_wallet: bool,
    #[max_len(16)]
    pub committee_wallet_rejections: Vec<Pubkey>,
    pub funds_retrieved: bool,

    /// Total compensation scheduled on a negative outcome, shared by the flagged identities.
    pub compensation_owed: u64,
    pub primary_compensated: bool,
    pub secondary_compensated: bool,
}

impl Report {
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.lifetime_end
    }

    pub fn is_open(&self, now: i64) -> bool {
        !self.resolved && !self.is_expired(now)
    }

    pub fn outcome(&self) -> Option<bool> {
        self.resolved.then_some(self.outcome)
    }

    pub fn status(&self, now: i64) -> ReportStatus {
        if self.resolved {
            return ReportStatus::Resolved(self.outcome);
        }
        if self.is_expired(now) {
            return ReportStatus::Expired;
        }
        match self.tally() {
            BlocTally::Split => ReportStatus::AwaitingTieBreak,
            _ => ReportStatus::Open,
        }
    }

    fn require_open(&self, now: i64) -> Result<()> {
        require!(!self.resolved, ReportGuardError::AlreadySolved);
        require!(!self.is_expired(now), ReportGuardError::ReportExpired);
        Ok(())
    }

    /// Flags a second account under the same report. No extra stake is charged.
    pub fn extend(
        &mut self,
        caller: Pubkey,
        account: Pubkey,
        token_account: Pubkey,
        balance: u64,
        now: i64,
    ) -> Result<()> {
        require_keys_eq!(caller, self.reporter, ReportGuardError::NotReporter);
        self.require_open(now)?;
        require!(self.secondary_account.is_none(), ReportGuardError::AlreadyExtended);
        require!(account != self.primary_account, ReportGuardError::InvalidTarget);

        self.secondary_account = Some(account);
        self.secondary_token_account = Some(token_account);
        self.frozen_balance = self
            .frozen_balance
            .checked_add(balance)
            .ok_or(ReportGuardError::MathOverflow)?;
        Ok(())
    }

    pub fn record_stake(&mut self, staker: Pubkey, now: i64) -> Result<()> {
        self.require_open(now)?;
        require!(staker != self.reporter, ReportGuardError::SelfReport);

        self.staker_count = self
            .staker_count
            .checked_add(1)
            .ok_or(ReportGuardError::MathOverflow)?;
        self.staked_at_sum = self
            .staked_at_sum
            .checked_add(now)
            .ok_or(ReportGuardError::MathOverflow)?;
        Ok(())
    }

    /// Stake weight: time between joining and resolution. Before resolution the
    /// weight is measured against `now` and is informational only.
    pub fn claimable_weight(&self, staked_at: i64, now: i64) -> u64 {
        let until = if self.resolved { self.resolved_at } else { now };
        stake_weight(staked_at, until)
    }

    pub fn record_team_vote(&mut self, vote: bool, now: i64) -> Result<()> {
        self.require_open(now)?;
        require!(self.team_vote.is_none(), ReportGuardError::AlreadyVoted);
        self.team_vote = Some(vote);
        Ok(())
    }

    pub fn record_owner_vote(&mut self, vote: bool, now: i64) -> Result<()> {
        self.require_open(now)?;
        require!(self.owner_vote.is_none(), ReportGuardError::AlreadyVoted);
        self.owner_vote = Some(vote);
        Ok(())
    }

    /// Records a member's ballot. Ballots cast after the bloc vote is fixed are
    /// kept so those members can claim, but never change the bloc vote.
    pub fn record_committee_vote(
        &mut self,
        member: Pubkey,
        vote: bool,
        committee_size: usize,
        now: i64,
    ) -> Result<()> {
        self.require_open(now)?;
        require!(
            !self.ballots.iter().any(|b| b.member == member),
            ReportGuardError::AlreadyVoted
        );
        require!(self.ballots.len() < MAX_COMMITTEE_MEMBERS, ReportGuardError::CommitteeFull);

        self.ballots.push(Ballot {
            member,
            vote,
            claimed: false,
        });
        if self.committee_vote.is_none() {
            self.committee_vote = self.ballot_majority(committee_size);
        }
        Ok(())
    }

    /// Quorum snapshot taken at creation, lowered when the committee has since
    /// shrunk below it.
    pub fn effective_quorum(&self, committee_size: usize) -> usize {
        (self.committee_quorum as usize).min(committee_size).max(1)
    }

    /// Strict majority of the ballots once quorum is met. An exact split is
    /// undecided until another member votes.
    fn ballot_majority(&self, committee_size: usize) -> Option<bool> {
        let cast = self.ballots.len();
        if cast < self.effective_quorum(committee_size) {
            return None;
        }
        let yes = self.ballots.iter().filter(|b| b.vote).count();
        match yes.cmp(&(cast - yes)) {
            std::cmp::Ordering::Greater => Some(true),
            std::cmp::Ordering::Less => Some(false),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn committee_verdict(&self) -> Option<bool> {
        self.committee_vote
    }

    pub fn tally(&self) -> BlocTally {
        BlocTally::from_votes(self.team_vote, self.owner_vote, self.committee_verdict())
    }

    /// Settles the outcome. A report still unresolved at `lifetime_end` resolves
    /// to `false` whatever the blocs voted; by then the account may already be
    /// held by a newer report.
    pub fn resolve(&mut self, now: i64) -> Result<bool> {
        require!(!self.resolved, ReportGuardError::AlreadySolved);

        let outcome = if self.is_expired(now) {
            false
        } else {
            match self.tally() {
                BlocTally::Decided(outcome) => outcome,
                BlocTally::Split => return err!(ReportGuardError::NeedsTieBreak),
                BlocTally::Undecided => return err!(ReportGuardError::InsufficientVotes),
            }
        };

        self.resolved = true;
        self.outcome = outcome;
        self.resolved_at = now;

        if !outcome {
            self.compensation_owed =
                percent_of(self.terms.report_stake, self.terms.compensation_pct)?;
        }
        Ok(outcome)
    }

    /// Staking-token value the protocol keeps when the report is rejected:
    /// the reporter's fee plus every third-party stake.
    pub fn forfeited_stake(&self) -> Result<u64> {
        let stakes = self
            .terms
            .staking_amount
            .checked_mul(self.staker_count as u64)
            .ok_or(ReportGuardError::MathOverflow)?;
        Ok(self
            .terms
            .report_stake
            .checked_add(stakes)
            .ok_or(ReportGuardError::MathOverflow)?)
    }

    pub fn require_confirmed(&self) -> Result<()> {
        require!(self.resolved, ReportGuardError::NotResolved);
        require!(self.outcome, ReportGuardError::NotConfirmed);
        Ok(())
    }

    fn require_payable(&self) -> Result<()> {
        self.require_confirmed()?;
        require!(self.funds_released, ReportGuardError::FundsNotReleased);
        Ok(())
    }

    /// Marks the frozen balance as delivered to the report vault. `seized` is
    /// what was moved out of the flagged account(s); it must cover every pool.
    pub fn release_funds(&mut self, seized: u64) -> Result<u64> {
        self.require_confirmed()?;
        require!(!self.funds_released, ReportGuardError::FundsAlreadyReleased);
        require!(seized >= self.frozen_balance, ReportGuardError::InsufficientFunds);
        self.funds_released = true;
        Ok(self.frozen_balance)
    }

    pub fn reward_pools(&self) -> Result<RewardPools> {
        RewardPools::compute(self.frozen_balance, &self.terms.rewards)
    }

    pub fn take_reporter_claim(&mut self, caller: Pubkey) -> Result<u64> {
        require_keys_eq!(caller, self.reporter, ReportGuardError::NotReporter);
        self.require_payable()?;
        require!(!self.reporter_claimed, ReportGuardError::AlreadyClaimed);

        let amount = self.reward_pools()?.reporter;
        self.reporter_claimed = true;
        Ok(amount)
    }

    /// Stake refund and asset reward owed to the reporter, as `(refund, reward)`.
    /// The refund is paid as soon as the report is confirmed; the reward waits
    /// for the frozen funds to reach the vault.
    pub fn take_reporter_payout(&mut self, caller: Pubkey) -> Result<(u64, u64)> {
        require_keys_eq!(caller, self.reporter, ReportGuardError::NotReporter);
        self.require_confirmed()?;

        let refunding = !self.reporter_refunded;
        let reward = if !refunding || self.funds_released {
            self.take_reporter_claim(caller)?
        } else {
            0
        };
        let refund = if refunding {
            self.reporter_refunded = true;
            self.terms.report_stake
        } else {
            0
        };
        Ok((refund, reward))
    }

    pub fn take_team_claim(&mut self) -> Result<u64> {
        self.require_payable()?;
        require!(!self.team_claimed, ReportGuardError::AlreadyClaimed);

        let amount = self.reward_pools()?.team;
        self.team_claimed = true;
        Ok(amount)
    }

    pub fn take_committee_claim(&mut self, member: Pubkey) -> Result<u64> {
        self.require_payable()?;
        let pools = self.reward_pools()?;
        let voters = self.ballots.len() as u64;

        let ballot = self
            .ballots
            .iter_mut()
            .find(|b| b.member == member)
            .ok_or(ReportGuardError::NotCommitteeMember)?;
        require!(!ballot.claimed, ReportGuardError::AlreadyClaimed);
        ballot.claimed = true;

        Ok(pools.committee / voters)
    }

    /// Share of the staker pool earned by a stake placed at `staked_at`.
    pub fn staker_reward(&self, staked_at: i64) -> Result<u64> {
        self.require_confirmed()?;
        let pool = self.reward_pools()?.staker;
        let weight = stake_weight(staked_at, self.resolved_at);
        let total = total_stake_weight(self.staker_count, self.staked_at_sum, self.resolved_at)?;
        weighted_share(pool, weight, total, self.staker_count)
    }

    /// Share of `compensation_owed` for one wrongly flagged identity. With a
    /// second flagged account the amount is split, the primary identity taking
    /// the odd unit.
    pub fn take_compensation(&mut self, identity: Pubkey) -> Result<u64> {
        require!(self.resolved, ReportGuardError::NotResolved);
        require!(!self.outcome, ReportGuardError::NothingOwed);

        let identities = if self.secondary_account.is_some() { 2 } else { 1 };
        let share = self.compensation_owed / identities;

        if identity == self.primary_account {
            require!(!self.primary_compensated, ReportGuardError::AlreadyClaimed);
            self.primary_compensated = true;
            Ok(share + self.compensation_owed % identities)
        } else if Some(identity) == self.secondary_account {
            require!(!self.secondary_compensated, ReportGuardError::AlreadyClaimed);
            self.secondary_compensated = true;
            Ok(share)
        } else {
            err!(ReportGuardError::NotOwedParty)
        }
    }

    pub fn propose_wallet(&mut self, wallet: Pubkey, now: i64) -> Result<()> {
        self.require_confirmed()?;
        require!(wallet != Pubkey::default(), ReportGuardError::ZeroWallet);
        require!(!self.funds_retrieved, ReportGuardError::FundsAlreadyRetrieved);
        require!(
            self.proposed_wallet.is_none() || self.wallet_rejected,
            ReportGuardError::WalletAlreadyProposed
        );

        self.proposed_wallet = Some(wallet);
        self.wallet_proposed_at = now;
        self.wallet_rejected = false;
        self.team_rejected_wallet = false;
        self.owner_rejected_wallet = false;
        self.committee_wallet_rejections.clear();
        Ok(())
    }

    pub fn dispute_deadline(&self) -> i64 {
        self.wallet_proposed_at.saturating_add(self.terms.dispute_period)
    }

    /// Records one bloc's rejection. The proposal falls once two of the three
    /// blocs reject; the committee bloc rejects on a strict majority of
    /// `committee_size`. Returns whether the proposal is now rejected.
    pub fn reject_wallet(
        &mut self,
        rejector: WalletRejector,
        committee_size: usize,
        now: i64,
    ) -> Result<bool> {
        require!(self.proposed_wallet.is_some(), ReportGuardError::NoProposedWallet);
        require!(!self.wallet_rejected, ReportGuardError::WalletRejected);
        require!(now < self.dispute_deadline(), ReportGuardError::DisputeWindowClosed);

        match rejector {
            WalletRejector::Team => {
                require!(!self.team_rejected_wallet, ReportGuardError::AlreadyRejected);
                self.team_rejected_wallet = true;
            }
            WalletRejector::Owner => {
                require!(!self.owner_rejected_wallet, ReportGuardError::AlreadyRejected);
                self.owner_rejected_wallet = true;
            }
            WalletRejector::Committee(member) => {
                require!(
                    !self.committee_wallet_rejections.contains(&member),
                    ReportGuardError::AlreadyRejected
                );
                require!(
                    self.committee_wallet_rejections.len() < MAX_COMMITTEE_MEMBERS,
                    ReportGuardError::CommitteeFull
                );
                self.committee_wallet_rejections.push(member);
            }
        }

        let committee_rejects = committee_size > 0
            && self.committee_wallet_rejections.len() * 2 > committee_size;
        let blocs = u8::from(self.team_rejected_wallet)
            + u8::from(self.owner_rejected_wallet)
            + u8::from(committee_rejects);

        if blocs >= 2 {
            self.wallet_rejected = true;
        }
        Ok(self.wallet_rejected)
    }

    /// Amount the proposed wallet may take once the dispute period is over.
    pub fn take_retrieval(&mut self, caller: Pubkey, now: i64) -> Result<u64> {
        self.require_payable()?;
        let wallet = self.proposed_wallet.ok_or(ReportGuardError::NoProposedWallet)?;
        require_keys_eq!(caller, wallet, ReportGuardError::NotProposedWallet);
        require!(!self.wallet_rejected, ReportGuardError::WalletRejected);
        require!(now >= self.dispute_deadline(), ReportGuardError::DisputeWindowOpen);
        require!(!self.funds_retrieved, ReportGuardError::FundsAlreadyRetrieved);

        let amount = self.reward_pools()?.remainder(
            self.frozen_balance,
            !self.ballots.is_empty(),
            self.staker_count > 0,
        )?;
        self.funds_retrieved = true;
        Ok(amount)
    }
}

#[account]
#[derive(InitSpace, Default)]
pub struct StakeRecord {
    pub report_id: u64,
    pub staker: Pubkey,
    pub bump: u8,
    pub staked: bool,
    pub staked_at: i64,
    pub claimed: bool,
    pub refunded: bool,
}

impl StakeRecord {
    pub fn open(&mut self, report_id: u64, staker: Pubkey, bump: u8, now: i64) -> Result<()> {
        require!(!self.staked, ReportGuardError::AlreadyStaked);
        self.report_id = report_id;
        self.staker = staker;
        self.bump = bump;
        self.staked = true;
        self.staked_at = now;
        self.claimed = false;
        self.refunded = false;
        Ok(())
    }

    /// Reward owed to this staker. Only touches this record's own flag.
    pub fn take_claim(&mut self, report: &Report) -> Result<u64> {
        require!(
            self.staked && self.report_id == report.id,
            ReportGuardError::NotStaker
        );
        require!(report.funds_released, ReportGuardError::FundsNotReleased);
        require!(!self.claimed, ReportGuardError::AlreadyClaimed);

        let amount = report.staker_reward(self.staked_at)?;
        self.claimed = true;
        Ok(amount)
    }

    /// `(refund, reward)` for this stake. Same gating as the reporter payout.
    pub fn take_payout(&mut self, report: &Report) -> Result<(u64, u64)> {
        require!(
            self.staked && self.report_id == report.id,
            ReportGuardError::NotStaker
        );
        report.require_confirmed()?;

        let refunding = !self.refunded;
        let reward = if !refunding || report.funds_released {
            self.take_claim(report)?
        } else {
            0
        };
        let refund = if refunding {
            self.refunded = true;
            report.terms.staking_amount
        } else {
            0
        };
        Ok((refund, reward))
    }
}

// ----------------------------
// Compensation
// ----------------------------

/// Per-identity index of compensation owed for wrongful reports.
#[account]
#[derive(InitSpace, Default)]
pub struct Compensation {
    pub identity: Pubkey,
    pub bump: u8,
    pub owed: u64,
    pub pending_reports: u32,
    pub retrieved_total: u64,
}

impl Compensation {
    pub fn record(&mut self, amount: u64) -> Result<()> {
        self.owed = self
            .owed
            .checked_add(amount)
            .ok_or(ReportGuardError::MathOverflow)?;
        self.pending_reports = self
            .pending_reports
            .checked_add(1)
            .ok_or(ReportGuardError::MathOverflow)?;
        Ok(())
    }

    pub fn take_owed(&mut self, caller: Pubkey) -> Result<u64> {
        require_keys_eq!(caller, self.identity, ReportGuardError::NotOwedParty);
        require!(self.owed > 0, ReportGuardError::NothingOwed);

        let amount = self.owed;
        self.retrieved_total = self
            .retrieved_total
            .checked_add(amount)
            .ok_or(ReportGuardError::MathOverflow)?;
        self.owed = 0;
        self.pending_reports = 0;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    const T0: i64 = 1_700_000_000;
    const LIFETIME: i64 = 86_400;
    const COMMITTEE: usize = 5;

    fn assert_err<T: std::fmt::Debug>(res: Result<T>, expected: ReportGuardError) {
        match res {
            Err(Error::AnchorError(e)) => {
                assert_eq!(e.error_code_number, u32::from(expected), "{}", e.error_name)
            }
            other => panic!("expected {expected:?}, got {other:?}"),
        }
    }

    fn terms() -> ReportTerms {
        ReportTerms {
            config_version: 1,
            rewards: RewardPercents {
                reporter: 2,
                team: 10,
                committee: 2,
                staker: 2,
            },
            compensation_pct: 2,
            report_stake: 1_000,
            staking_amount: 500,
            dispute_period: 3_600,
        }
    }

    fn open_report() -> Report {
        Report {
            id: 7,
            asset: Pubkey::new_unique(),
            reporter: Pubkey::new_unique(),
            primary_account: Pubkey::new_unique(),
            primary_token_account: Pubkey::new_unique(),
            created_at: T0,
            lifetime_end: T0 + LIFETIME,
            terms: terms(),
            frozen_balance: 1_000_000,
            committee_quorum: 2,
            ..Default::default()
        }
    }

    fn confirmed_report() -> Report {
        let mut r = open_report();
        r.record_team_vote(true, T0 + 10).unwrap();
        r.record_owner_vote(true, T0 + 20).unwrap();
        assert!(r.resolve(T0 + 30).unwrap());
        r.release_funds(1_000_000).unwrap();
        r
    }

    #[test]
    fn tally_covers_every_bloc_count() {
        assert_eq!(BlocTally::from_votes(None, None, None), BlocTally::Undecided);
        assert_eq!(BlocTally::from_votes(Some(true), None, None), BlocTally::Undecided);
        assert_eq!(BlocTally::from_votes(Some(true), Some(true), None), BlocTally::Decided(true));
        assert_eq!(BlocTally::from_votes(None, Some(false), Some(false)), BlocTally::Decided(false));
        assert_eq!(BlocTally::from_votes(Some(true), Some(false), None), BlocTally::Split);
        assert_eq!(
            BlocTally::from_votes(Some(true), Some(false), Some(false)),
            BlocTally::Decided(false)
        );
        assert_eq!(
            BlocTally::from_votes(Some(false), Some(true), Some(true)),
            BlocTally::Decided(true)
        );
    }

    #[test]
    fn tie_break_follows_committee() {
        for committee in [true, false] {
            let mut r = open_report();
            r.record_team_vote(true, T0 + 1).unwrap();
            r.record_owner_vote(false, T0 + 2).unwrap();
            assert_eq!(r.status(T0 + 3), ReportStatus::AwaitingTieBreak);
            assert_err(r.resolve(T0 + 3), ReportGuardError::NeedsTieBreak);
            assert!(!r.resolved);

            r.record_committee_vote(Pubkey::new_unique(), committee, COMMITTEE, T0 + 4).unwrap();
            r.record_committee_vote(Pubkey::new_unique(), committee, COMMITTEE, T0 + 5).unwrap();
            assert_eq!(r.resolve(T0 + 6).unwrap(), committee);
            assert_eq!(r.status(T0 + 7), ReportStatus::Resolved(committee));
        }
    }

    #[test]
    fn resolve_requires_two_blocs() {
        let mut r = open_report();
        assert_err(r.resolve(T0 + 1), ReportGuardError::InsufficientVotes);
        r.record_team_vote(true, T0 + 1).unwrap();
        assert_err(r.resolve(T0 + 2), ReportGuardError::InsufficientVotes);
    }

    #[test]
    fn committee_bloc_needs_quorum_and_majority() {
        let mut r = open_report();
        r.committee_quorum = 3;
        r.record_committee_vote(Pubkey::new_unique(), true, COMMITTEE, T0 + 1).unwrap();
        r.record_committee_vote(Pubkey::new_unique(), true, COMMITTEE, T0 + 2).unwrap();
        assert_eq!(r.committee_verdict(), None);

        r.record_committee_vote(Pubkey::new_unique(), false, COMMITTEE, T0 + 3).unwrap();
        assert_eq!(r.committee_verdict(), Some(true));
    }

    #[test]
    fn committee_even_split_waits_for_another_ballot() {
        let mut r = open_report();
        r.record_committee_vote(Pubkey::new_unique(), true, COMMITTEE, T0 + 1).unwrap();
        r.record_committee_vote(Pubkey::new_unique(), false, COMMITTEE, T0 + 2).unwrap();
        assert_eq!(r.committee_verdict(), None);

        r.record_committee_vote(Pubkey::new_unique(), false, COMMITTEE, T0 + 3).unwrap();
        assert_eq!(r.committee_verdict(), Some(false));
    }

    #[test]
    fn each_bloc_votes_once() {
        let mut r = open_report();
        let member = Pubkey::new_unique();
        r.record_team_vote(true, T0 + 1).unwrap();
        assert_err(r.record_team_vote(false, T0 + 2), ReportGuardError::AlreadyVoted);
        r.record_owner_vote(true, T0 + 1).unwrap();
        assert_err(r.record_owner_vote(true, T0 + 2), ReportGuardError::AlreadyVoted);
        r.record_committee_vote(member, true, COMMITTEE, T0 + 1).unwrap();
        assert_err(
            r.record_committee_vote(member, false, COMMITTEE, T0 + 2),
            ReportGuardError::AlreadyVoted,
        );
        assert_eq!(r.team_vote, Some(true));
        assert_eq!(r.ballots.len(), 1);
    }

    #[test]
    fn resolved_report_rejects_everything() {
        let mut r = open_report();
        r.record_team_vote(false, T0 + 1).unwrap();
        r.record_owner_vote(false, T0 + 2).unwrap();
        assert!(!r.resolve(T0 + 3).unwrap());

        assert_err(r.resolve(T0 + 4), ReportGuardError::AlreadySolved);
        assert_err(
            r.record_committee_vote(Pubkey::new_unique(), true, COMMITTEE, T0 + 4),
            ReportGuardError::AlreadySolved,
        );
        assert_err(r.record_stake(Pubkey::new_unique(), T0 + 4), ReportGuardError::AlreadySolved);
    }

    #[test]
    fn expired_report_resolves_negatively_without_votes() {
        let mut r = open_report();
        let after = r.lifetime_end;
        assert!(!r.is_open(after));
        assert_eq!(r.status(after), ReportStatus::Expired);
        assert_err(r.record_team_vote(true, after), ReportGuardError::ReportExpired);
        assert_err(r.record_stake(Pubkey::new_unique(), after), ReportGuardError::ReportExpired);

        assert!(!r.resolve(after + 5).unwrap());
        assert_eq!(r.outcome(), Some(false));
        assert_eq!(r.compensation_owed, 20);
    }

    #[test]
    fn expired_split_defaults_to_false() {
        let mut r = open_report();
        r.record_team_vote(true, T0 + 1).unwrap();
        r.record_owner_vote(false, T0 + 2).unwrap();
        assert!(!r.resolve(r.lifetime_end).unwrap());
    }

    #[test]
    fn expired_flag_allows_rereport() {
        let asset = Pubkey::new_unique();
        let account = Pubkey::new_unique();
        let token_account = Pubkey::new_unique();
        let mut flag = FlagRecord::default();
        flag.check_reportable(T0).unwrap();
        flag.take(asset, account, token_account, 1, T0 + LIFETIME, 255);

        assert!(flag.blocks_transfers(T0 + 1));
        assert_err(flag.check_reportable(T0 + 1), ReportGuardError::ReportAlreadyOpen);

        // lifetime elapsed, report 1 still unresolved
        assert!(!flag.blocks_transfers(T0 + LIFETIME));
        flag.check_reportable(T0 + LIFETIME).unwrap();
        flag.take(asset, account, token_account, 2, T0 + 2 * LIFETIME, 255);

        // the stale report no longer owns the flag and must not thaw
        assert!(!flag.settle(1, false));
        assert!(flag.active);
        assert!(flag.settle(2, false));
        assert!(!flag.blocks_transfers(T0 + LIFETIME + 1));
    }

    #[test]
    fn confirmed_flag_stays_and_blocks_new_reports() {
        let mut flag = FlagRecord::default();
        flag.take(Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique(), 3, T0 + 10, 1);
        assert!(!flag.settle(3, true));
        assert!(flag.blocks_transfers(T0 + 1_000_000));
        assert_err(flag.check_reportable(T0 + 1_000_000), ReportGuardError::AlreadyConfirmed);
    }

    #[test]
    fn extend_only_once_by_reporter_while_open() {
        let mut r = open_report();
        let reporter = r.reporter;
        let second = Pubkey::new_unique();

        assert_err(
            r.extend(Pubkey::new_unique(), second, Pubkey::new_unique(), 5, T0 + 1),
            ReportGuardError::NotReporter,
        );
        assert_err(
            r.extend(reporter, r.primary_account, Pubkey::new_unique(), 5, T0 + 1),
            ReportGuardError::InvalidTarget,
        );
        r.extend(reporter, second, Pubkey::new_unique(), 5, T0 + 1).unwrap();
        assert_eq!(r.frozen_balance, 1_000_005);
        assert_err(
            r.extend(reporter, Pubkey::new_unique(), Pubkey::new_unique(), 5, T0 + 2),
            ReportGuardError::AlreadyExtended,
        );

        let mut late = open_report();
        let reporter = late.reporter;
        assert_err(
            late.extend(reporter, second, Pubkey::new_unique(), 5, late.lifetime_end),
            ReportGuardError::ReportExpired,
        );
    }

    #[test]
    fn reporter_cannot_stake_and_stakes_are_unique() {
        let mut r = open_report();
        let reporter = r.reporter;
        assert_err(r.record_stake(reporter, T0 + 1), ReportGuardError::SelfReport);

        let staker = Pubkey::new_unique();
        let mut record = StakeRecord::default();
        record.open(r.id, staker, 254, T0 + 1).unwrap();
        r.record_stake(staker, T0 + 1).unwrap();
        assert_err(record.open(r.id, staker, 254, T0 + 2), ReportGuardError::AlreadyStaked);
        assert_eq!(r.staker_count, 1);
    }

    #[test]
    fn reporter_claim_matches_percentage_scenario() {
        let mut r = confirmed_report();
        let reporter = r.reporter;
        assert_eq!(r.take_reporter_claim(reporter).unwrap(), 20_000);
        assert_err(r.take_reporter_claim(reporter), ReportGuardError::AlreadyClaimed);
        assert_err(r.take_reporter_claim(Pubkey::new_unique()), ReportGuardError::NotReporter);
    }

    #[test]
    fn claims_require_confirmed_and_released() {
        let mut r = open_report();
        assert_err(r.take_team_claim(), ReportGuardError::NotResolved);

        r.record_team_vote(true, T0 + 1).unwrap();
        r.record_owner_vote(true, T0 + 2).unwrap();
        r.resolve(T0 + 3).unwrap();
        assert_err(r.take_team_claim(), ReportGuardError::FundsNotReleased);

        let mut rejected = open_report();
        rejected.record_team_vote(false, T0 + 1).unwrap();
        rejected.record_owner_vote(false, T0 + 2).unwrap();
        rejected.resolve(T0 + 3).unwrap();
        assert_err(rejected.take_team_claim(), ReportGuardError::NotConfirmed);
        assert_err(rejected.release_funds(1_000_000), ReportGuardError::NotConfirmed);
    }

    #[test]
    fn release_happens_once() {
        let mut r = confirmed_report();
        assert_err(r.release_funds(1_000_000), ReportGuardError::FundsAlreadyReleased);
    }

    #[test]
    fn release_needs_the_whole_frozen_balance() {
        let mut r = open_report();
        r.record_team_vote(true, T0 + 1).unwrap();
        r.record_owner_vote(true, T0 + 2).unwrap();
        r.resolve(T0 + 3).unwrap();
        assert_err(r.release_funds(999_999), ReportGuardError::InsufficientFunds);
        assert!(!r.funds_released);
        assert_eq!(r.release_funds(1_000_000).unwrap(), 1_000_000);
    }

    #[test]
    fn committee_claim_is_per_voter() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let mut r = open_report();
        r.record_committee_vote(a, true, COMMITTEE, T0 + 1).unwrap();
        r.record_committee_vote(b, true, COMMITTEE, T0 + 2).unwrap();
        r.record_team_vote(true, T0 + 3).unwrap();
        r.resolve(T0 + 4).unwrap();
        r.release_funds(1_000_000).unwrap();

        // committee pool 20_000 split between two voters
        assert_eq!(r.take_committee_claim(b).unwrap(), 10_000);
        assert_eq!(r.take_committee_claim(a).unwrap(), 10_000);
        assert_err(r.take_committee_claim(a), ReportGuardError::AlreadyClaimed);
        assert_err(
            r.take_committee_claim(Pubkey::new_unique()),
            ReportGuardError::NotCommitteeMember,
        );
    }

    #[test]
    fn earlier_stakers_earn_more() {
        let mut r = open_report();
        let joins = [T0 + 100, T0 + 200, T0 + 300, T0 + 400];
        let mut records: Vec<StakeRecord> = Vec::new();
        for at in joins {
            let staker = Pubkey::new_unique();
            let mut rec = StakeRecord::default();
            rec.open(r.id, staker, 1, at).unwrap();
            r.record_stake(staker, at).unwrap();
            records.push(rec);
        }
        r.record_team_vote(true, T0 + 500).unwrap();
        r.record_owner_vote(true, T0 + 500).unwrap();
        r.resolve(T0 + 1_000).unwrap();
        r.release_funds(1_000_000).unwrap();

        let rewards: Vec<u64> = records
            .iter_mut()
            .map(|rec| rec.take_claim(&r).unwrap())
            .collect();
        assert!(rewards.windows(2).all(|w| w[0] > w[1]), "{rewards:?}");

        let pool = r.reward_pools().unwrap().staker;
        let paid: u64 = rewards.iter().sum();
        assert!(paid <= pool);
        assert!(pool - paid < records.len() as u64);

        assert_err(records[0].take_claim(&r), ReportGuardError::AlreadyClaimed);
    }

    #[test]
    fn stake_for_other_report_is_not_claimable() {
        let r = confirmed_report();
        let mut rec = StakeRecord::default();
        rec.open(r.id + 1, Pubkey::new_unique(), 1, T0).unwrap();
        assert_err(rec.take_claim(&r), ReportGuardError::NotStaker);
    }

    #[test]
    fn claimable_weight_tracks_now_until_resolution() {
        let mut r = open_report();
        assert_eq!(r.claimable_weight(T0 + 10, T0 + 110), 100);
        r.record_team_vote(true, T0 + 1).unwrap();
        r.record_owner_vote(true, T0 + 1).unwrap();
        r.resolve(T0 + 60).unwrap();
        assert_eq!(r.claimable_weight(T0 + 10, T0 + 10_000), 50);
    }

    #[test]
    fn conservation_when_everyone_claims() {
        let member = Pubkey::new_unique();
        let staker = Pubkey::new_unique();
        let wallet = Pubkey::new_unique();

        let mut r = open_report();
        r.frozen_balance = 999_999;
        r.record_committee_vote(member, true, COMMITTEE, T0 + 1).unwrap();
        r.record_committee_vote(Pubkey::new_unique(), true, COMMITTEE, T0 + 1).unwrap();
        r.record_committee_vote(Pubkey::new_unique(), true, COMMITTEE, T0 + 1).unwrap();
        let mut rec = StakeRecord::default();
        rec.open(r.id, staker, 1, T0 + 5).unwrap();
        r.record_stake(staker, T0 + 5).unwrap();
        r.record_team_vote(true, T0 + 6).unwrap();
        r.resolve(T0 + 10).unwrap();
        r.release_funds(1_000_000).unwrap();

        let reporter = r.reporter;
        let mut paid = r.take_reporter_claim(reporter).unwrap();
        paid += r.take_team_claim().unwrap();
        let voters: Vec<Pubkey> = r.ballots.iter().map(|b| b.member).collect();
        for v in voters {
            paid += r.take_committee_claim(v).unwrap();
        }
        paid += rec.take_claim(&r).unwrap();

        r.propose_wallet(wallet, T0 + 20).unwrap();
        paid += r.take_retrieval(wallet, r.dispute_deadline()).unwrap();

        assert!(paid <= r.frozen_balance);
        // per-voter floor division is the only dust left behind
        assert!(r.frozen_balance - paid < 3);
    }

    #[test]
    fn remainder_absorbs_pools_without_claimants() {
        let wallet = Pubkey::new_unique();
        let mut r = confirmed_report();
        r.propose_wallet(wallet, T0 + 100).unwrap();
        // no ballots, no stakers: 100% - 2% - 10%
        assert_eq!(r.take_retrieval(wallet, T0 + 100 + 3_600).unwrap(), 880_000);
    }

    #[test]
    fn wallet_retrieval_gated_by_dispute_window() {
        let wallet = Pubkey::new_unique();
        let mut r = confirmed_report();
        assert_err(r.propose_wallet(Pubkey::default(), T0 + 100), ReportGuardError::ZeroWallet);
        assert_err(r.take_retrieval(wallet, T0 + 100), ReportGuardError::NoProposedWallet);

        r.propose_wallet(wallet, T0 + 100).unwrap();
        assert_err(
            r.propose_wallet(Pubkey::new_unique(), T0 + 101),
            ReportGuardError::WalletAlreadyProposed,
        );
        assert_err(r.take_retrieval(wallet, T0 + 200), ReportGuardError::DisputeWindowOpen);
        assert_err(
            r.take_retrieval(Pubkey::new_unique(), T0 + 10_000),
            ReportGuardError::NotProposedWallet,
        );
        r.take_retrieval(wallet, T0 + 10_000).unwrap();
        assert_err(r.take_retrieval(wallet, T0 + 10_001), ReportGuardError::FundsAlreadyRetrieved);
    }

    #[test]
    fn two_rejecting_blocs_reject_wallet_and_allow_new_proposal() {
        let wallet = Pubkey::new_unique();
        let m1 = Pubkey::new_unique();
        let m2 = Pubkey::new_unique();
        let mut r = confirmed_report();
        r.propose_wallet(wallet, T0 + 100).unwrap();

        assert!(!r.reject_wallet(WalletRejector::Team, 3, T0 + 101).unwrap());
        assert_err(
            r.reject_wallet(WalletRejector::Team, 3, T0 + 102),
            ReportGuardError::AlreadyRejected,
        );
        assert!(!r.reject_wallet(WalletRejector::Committee(m1), 3, T0 + 103).unwrap());
        assert_err(
            r.reject_wallet(WalletRejector::Committee(m1), 3, T0 + 104),
            ReportGuardError::AlreadyRejected,
        );
        // 2 of 3 members: committee bloc rejects, second bloc reached
        assert!(r.reject_wallet(WalletRejector::Committee(m2), 3, T0 + 105).unwrap());
        assert_err(r.take_retrieval(wallet, T0 + 10_000), ReportGuardError::WalletRejected);

        let replacement = Pubkey::new_unique();
        r.propose_wallet(replacement, T0 + 200).unwrap();
        assert!(!r.wallet_rejected);
        assert!(r.committee_wallet_rejections.is_empty());
        assert_err(
            r.reject_wallet(WalletRejector::Owner, 3, r.dispute_deadline()),
            ReportGuardError::DisputeWindowClosed,
        );
        let deadline = r.dispute_deadline();
        assert!(r.take_retrieval(replacement, deadline).unwrap() > 0);
    }

    #[test]
    fn negative_resolution_owes_compensation_from_reporter_stake() {
        let mut r = open_report();
        r.record_stake(Pubkey::new_unique(), T0 + 1).unwrap();
        r.record_team_vote(false, T0 + 2).unwrap();
        r.record_owner_vote(false, T0 + 3).unwrap();
        assert!(!r.resolve(T0 + 4).unwrap());

        // 1000 * 2 / 100
        assert_eq!(r.compensation_owed, 20);
        assert_eq!(r.forfeited_stake().unwrap(), 1_500);
    }

    #[test]
    fn compensation_accumulates_and_pays_once() {
        let identity = Pubkey::new_unique();
        let mut comp = Compensation {
            identity,
            ..Default::default()
        };
        assert_err(comp.take_owed(identity), ReportGuardError::NothingOwed);

        comp.record(20).unwrap();
        comp.record(30).unwrap();
        assert_eq!(comp.pending_reports, 2);
        assert_err(comp.take_owed(Pubkey::new_unique()), ReportGuardError::NotOwedParty);
        assert_eq!(comp.take_owed(identity).unwrap(), 50);
        assert_err(comp.take_owed(identity), ReportGuardError::NothingOwed);

        // a later wrongful report is claimable on its own
        comp.record(20).unwrap();
        assert_eq!(comp.take_owed(identity).unwrap(), 20);
        assert_eq!(comp.retrieved_total, 70);
    }

    #[test]
    fn terms_snapshot_survives_config_changes() {
        let mut cfg = Config {
            admin: Pubkey::new_unique(),
            recovery_admin: Pubkey::new_unique(),
            pause_admin: Pubkey::new_unique(),
            bump: 255,
            paused: false,
            stake_mint: Pubkey::new_unique(),
            stake_vault: Pubkey::new_unique(),
            stake_vault_bump: 254,
            rewards: terms().rewards,
            compensation_pct: 2,
            report_stake: 1_000,
            staking_amount: 500,
            report_lifetime: LIFETIME,
            dispute_period: 3_600,
            config_version: 1,
            forfeited_balance: 0,
            version: INITIAL_VERSION,
        };
        let snapshot = cfg.snapshot_terms();

        cfg.rewards.reporter = 50;
        cfg.bump_config_version().unwrap();
        assert_eq!(snapshot.rewards.reporter, 2);
        assert_eq!(cfg.snapshot_terms().config_version, 2);
    }

    #[test]
    fn settings_validation() {
        ReportSettings::default().validate().unwrap();
        let zero_window = ReportSettings {
            dispute_period: 0,
            ..Default::default()
        };
        assert_err(zero_window.validate(), ReportGuardError::InvalidWindow);
        let free_report = ReportSettings {
            report_stake: 0,
            ..Default::default()
        };
        assert_err(free_report.validate(), ReportGuardError::InvalidAmount);
        let over = ReportSettings {
            compensation_pct: 101,
            ..Default::default()
        };
        assert_err(over.validate(), ReportGuardError::InvalidPercentages);
    }

    #[test]
    fn percentages_over_hundred_are_rejected() {
        let ok = RewardPercents {
            reporter: 40,
            team: 30,
            committee: 20,
            staker: 10,
        };
        ok.validate().unwrap();
        let bad = RewardPercents { staker: 11, ..ok };
        assert_err(bad.validate(), ReportGuardError::InvalidPercentages);
    }

    #[test]
    fn committee_bloc_vote_is_fixed_at_quorum() {
        let mut r = open_report();
        r.record_team_vote(true, T0 + 1).unwrap();
        r.record_owner_vote(false, T0 + 2).unwrap();
        r.record_committee_vote(Pubkey::new_unique(), true, COMMITTEE, T0 + 3).unwrap();
        r.record_committee_vote(Pubkey::new_unique(), true, COMMITTEE, T0 + 4).unwrap();
        assert_eq!(r.committee_verdict(), Some(true));
        assert_eq!(r.tally(), BlocTally::Decided(true));

        // late ballots outnumber the ones that reached quorum
        for at in [T0 + 5, T0 + 6, T0 + 7] {
            r.record_committee_vote(Pubkey::new_unique(), false, COMMITTEE, at).unwrap();
        }
        assert_eq!(r.ballots.len(), 5);
        assert_eq!(r.committee_verdict(), Some(true));
        assert_eq!(r.tally(), BlocTally::Decided(true));
        assert!(r.resolve(T0 + 8).unwrap());

        // late voters still share the committee pool
        r.release_funds(1_000_000).unwrap();
        let late = r.ballots[4].member;
        assert_eq!(r.take_committee_claim(late).unwrap(), 20_000 / 5);
    }

    #[test]
    fn quorum_follows_a_shrunken_committee() {
        let mut r = open_report();
        r.committee_quorum = 3;
        r.record_committee_vote(Pubkey::new_unique(), false, 2, T0 + 1).unwrap();
        assert_eq!(r.committee_verdict(), None);
        r.record_committee_vote(Pubkey::new_unique(), false, 2, T0 + 2).unwrap();
        assert_eq!(r.effective_quorum(2), 2);
        assert_eq!(r.committee_verdict(), Some(false));
    }

    #[test]
    fn expired_report_resolves_false_despite_agreeing_blocs() {
        let asset = Pubkey::new_unique();
        let token_account = Pubkey::new_unique();
        let mut old = open_report();
        let mut flag = FlagRecord::default();
        flag.take(asset, old.primary_account, token_account, old.id, old.lifetime_end, 255);

        old.record_team_vote(true, T0 + 1).unwrap();
        old.record_owner_vote(true, T0 + 2).unwrap();

        // nobody resolved in time; the account is reported again
        let later = old.lifetime_end + 1;
        flag.check_reportable(later).unwrap();
        flag.take(asset, old.primary_account, token_account, old.id + 1, later + LIFETIME, 255);

        assert!(!old.resolve(later).unwrap());
        assert_eq!(old.outcome(), Some(false));
        let reporter = old.reporter;
        assert_err(old.take_reporter_claim(reporter), ReportGuardError::NotConfirmed);
        assert_err(old.release_funds(1_000_000), ReportGuardError::NotConfirmed);
        assert!(!flag.settle(old.id, false));
        assert!(flag.held_by_open_report(later));
    }

    #[test]
    fn stake_refunds_do_not_wait_for_release() {
        let mut r = open_report();
        let staker = Pubkey::new_unique();
        let mut rec = StakeRecord::default();
        rec.open(r.id, staker, 1, T0 + 5).unwrap();
        r.record_stake(staker, T0 + 5).unwrap();
        let mut early = rec.clone();
        assert_err(early.take_payout(&r), ReportGuardError::NotResolved);

        r.record_team_vote(true, T0 + 6).unwrap();
        r.record_owner_vote(true, T0 + 7).unwrap();
        r.resolve(T0 + 10).unwrap();

        let reporter = r.reporter;
        assert_eq!(r.take_reporter_payout(reporter).unwrap(), (1_000, 0));
        assert_eq!(rec.take_payout(&r).unwrap(), (500, 0));
        assert_err(r.take_reporter_payout(reporter), ReportGuardError::FundsNotReleased);
        assert_err(rec.take_payout(&r), ReportGuardError::FundsNotReleased);

        r.release_funds(1_000_000).unwrap();
        assert_eq!(r.take_reporter_payout(reporter).unwrap(), (0, 20_000));
        assert_eq!(rec.take_payout(&r).unwrap(), (0, 20_000));
        assert_err(r.take_reporter_payout(reporter), ReportGuardError::AlreadyClaimed);
        assert_err(rec.take_payout(&r), ReportGuardError::AlreadyClaimed);
    }

    #[test]
    fn payout_after_release_pays_refund_and_reward_together() {
        let mut r = confirmed_report();
        let reporter = r.reporter;
        assert_eq!(r.take_reporter_payout(reporter).unwrap(), (1_000, 20_000));
        assert_err(r.take_reporter_payout(Pubkey::new_unique()), ReportGuardError::NotReporter);
    }

    #[test]
    fn compensation_is_shared_by_flagged_identities() {
        let mut r = open_report();
        r.terms.compensation_pct = 3;
        let reporter = r.reporter;
        let second = Pubkey::new_unique();
        r.extend(reporter, second, Pubkey::new_unique(), 10, T0 + 1).unwrap();
        let primary = r.primary_account;
        assert_err(r.take_compensation(primary), ReportGuardError::NotResolved);

        r.record_team_vote(false, T0 + 2).unwrap();
        r.record_owner_vote(false, T0 + 3).unwrap();
        r.resolve(T0 + 4).unwrap();
        // 1000 * 3 / 100 = 30 split between two identities
        assert_eq!(r.compensation_owed, 30);
        assert_eq!(r.take_compensation(second).unwrap(), 15);
        assert_eq!(r.take_compensation(primary).unwrap(), 15);
        assert_err(r.take_compensation(primary), ReportGuardError::AlreadyClaimed);
        assert_err(r.take_compensation(reporter), ReportGuardError::NotOwedParty);

        let mut confirmed = confirmed_report();
        let target = confirmed.primary_account;
        assert_err(confirmed.take_compensation(target), ReportGuardError::NothingOwed);
    }

    #[test]
    fn single_identity_takes_full_compensation() {
        let mut r = open_report();
        r.record_team_vote(false, T0 + 1).unwrap();
        r.record_owner_vote(false, T0 + 2).unwrap();
        r.resolve(T0 + 3).unwrap();
        let primary = r.primary_account;
        assert_eq!(r.take_compensation(primary).unwrap(), 20);
    }

    #[test]
    fn committee_membership_keeps_quorum_reachable() {
        let members: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        let mut c = Committee::default();
        c.seat(members.clone(), 3).unwrap();
        assert_err(c.add_member(members[0]), ReportGuardError::CommitteeMemberExists);
        assert_err(c.add_member(Pubkey::default()), ReportGuardError::ZeroWallet);
        assert_err(c.set_quorum(4), ReportGuardError::InvalidQuorum);
        assert_err(c.set_quorum(0), ReportGuardError::InvalidQuorum);

        c.remove_member(members[1]).unwrap();
        assert_eq!(c.quorum, 2);
        assert!(!c.is_member(&members[1]));
        assert_err(c.remove_member(members[1]), ReportGuardError::CommitteeMemberNotFound);

        c.remove_member(members[0]).unwrap();
        c.remove_member(members[2]).unwrap();
        assert_eq!(c.quorum, 1);
        assert!(c.members.is_empty());

        let dup = vec![members[0], members[0]];
        assert_err(Committee::default().seat(dup, 1), ReportGuardError::CommitteeMemberExists);
    }
}
