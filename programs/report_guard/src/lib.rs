use anchor_lang::prelude::*;

pub mod errors;
pub mod instructions;
pub mod state;
pub mod utils;
pub mod contexts;
pub mod constants;

pub use utils::*;
pub use instructions::*;
pub use state::*;
pub use errors::*;
pub use contexts::*;
pub use constants::*;

declare_id!("5uLXaZw7CX6HdqxYKHxVhZB7aMGaeQUhP74NX3rEyQgE");

#[program]
pub mod report_guard {
    use super::*;
    use crate::instructions::{
        admin, committee, compensation, report, reward, stake, treasury, views, vote,
    };

    // ----------------------------
    // Setup / admin
    // ----------------------------
    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        recovery_admin: Pubkey,
        pause_admin: Pubkey,
        rewards: RewardPercents,
        settings: ReportSettings,
    ) -> Result<()> {
        admin::initialize_config(ctx, recovery_admin, pause_admin, rewards, settings)
    }

    pub fn initialize_report_registry(ctx: Context<InitializeReportRegistry>) -> Result<()> {
        admin::initialize_report_registry(ctx)
    }

    pub fn update_reward_config(ctx: Context<UpdateConfig>, rewards: RewardPercents) -> Result<()> {
        admin::update_reward_config(ctx, rewards)
    }

    pub fn update_report_settings(ctx: Context<UpdateConfig>, settings: ReportSettings) -> Result<()> {
        admin::update_report_settings(ctx, settings)
    }

    pub fn set_pause(ctx: Context<UpdateConfig>, paused: bool) -> Result<()> {
        admin::set_pause(ctx, paused)
    }

    pub fn set_pause_admin(ctx: Context<UpdateConfig>, pause_admin: Pubkey) -> Result<()> {
        admin::set_pause_admin(ctx, pause_admin)
    }

    pub fn set_admin(ctx: Context<UpdateConfig>, new_admin: Pubkey) -> Result<()> {
        admin::set_admin(ctx, new_admin)
    }

    pub fn set_recovery_admin(ctx: Context<UpdateConfig>, new_recovery_admin: Pubkey) -> Result<()> {
        admin::set_recovery_admin(ctx, new_recovery_admin)
    }

    pub fn register_asset(ctx: Context<RegisterAsset>, token_owner: Pubkey) -> Result<()> {
        admin::register_asset(ctx, token_owner)
    }

    pub fn set_asset_owner(ctx: Context<SetAssetOwner>, token_owner: Pubkey) -> Result<()> {
        admin::set_asset_owner(ctx, token_owner)
    }

    pub fn set_exemption(ctx: Context<SetExemption>, address: Pubkey, exempt: bool) -> Result<()> {
        admin::set_exemption(ctx, address, exempt)
    }

    pub fn sweep_forfeited_stakes(ctx: Context<SweepForfeitedStakes>, amount: u64) -> Result<()> {
        admin::sweep_forfeited_stakes(ctx, amount)
    }

    // ----------------------------
    // Committee admin controls
    // ----------------------------
    pub fn initialize_committee(
        ctx: Context<InitializeCommittee>,
        quorum: u8,
        initial_members: Vec<Pubkey>,
    ) -> Result<()> {
        committee::initialize_committee(ctx, quorum, initial_members)
    }

    pub fn add_committee_member(ctx: Context<ManageCommittee>, member: Pubkey) -> Result<()> {
        committee::add_committee_member(ctx, member)
    }

    pub fn remove_committee_member(ctx: Context<ManageCommittee>, member: Pubkey) -> Result<()> {
        committee::remove_committee_member(ctx, member)
    }

    pub fn set_committee_quorum(ctx: Context<ManageCommittee>, quorum: u8) -> Result<()> {
        committee::set_committee_quorum(ctx, quorum)
    }

    // ----------------------------
    // Reports
    // ----------------------------
    pub fn create_report(ctx: Context<CreateReport>) -> Result<()> {
        report::create_report(ctx)
    }

    pub fn extend_report(ctx: Context<ExtendReport>, report_id: u64) -> Result<()> {
        report::extend_report(ctx, report_id)
    }

    pub fn stake(ctx: Context<StakeOnReport>, report_id: u64) -> Result<()> {
        stake::stake(ctx, report_id)
    }

    pub fn team_vote(ctx: Context<ReportAction>, report_id: u64, vote: bool) -> Result<()> {
        vote::team_vote(ctx, report_id, vote)
    }

    pub fn owner_vote(ctx: Context<ReportAction>, report_id: u64, vote: bool) -> Result<()> {
        vote::owner_vote(ctx, report_id, vote)
    }

    pub fn committee_vote(ctx: Context<ReportAction>, report_id: u64, vote: bool) -> Result<()> {
        vote::committee_vote(ctx, report_id, vote)
    }

    pub fn resolve_report(ctx: Context<ResolveReport>, report_id: u64) -> Result<()> {
        report::resolve_report(ctx, report_id)
    }

    pub fn release_frozen_funds(ctx: Context<ReleaseFrozenFunds>, report_id: u64) -> Result<()> {
        report::release_frozen_funds(ctx, report_id)
    }

    // ----------------------------
    // Rewards / treasury / compensation
    // ----------------------------
    pub fn reporter_claim(ctx: Context<ReporterClaim>, report_id: u64) -> Result<()> {
        reward::reporter_claim(ctx, report_id)
    }

    pub fn team_claim(ctx: Context<ClaimShare>, report_id: u64) -> Result<()> {
        reward::team_claim(ctx, report_id)
    }

    pub fn committee_member_claim(ctx: Context<ClaimShare>, report_id: u64) -> Result<()> {
        reward::committee_member_claim(ctx, report_id)
    }

    pub fn staker_claim(ctx: Context<StakerClaim>, report_id: u64) -> Result<()> {
        reward::staker_claim(ctx, report_id)
    }

    pub fn propose_wallet(ctx: Context<ReportAction>, report_id: u64, wallet: Pubkey) -> Result<()> {
        treasury::propose_wallet(ctx, report_id, wallet)
    }

    pub fn reject_wallet(ctx: Context<ReportAction>, report_id: u64) -> Result<()> {
        treasury::reject_wallet(ctx, report_id)
    }

    pub fn retrieve_funds(ctx: Context<RetrieveFunds>, report_id: u64) -> Result<()> {
        treasury::retrieve_funds(ctx, report_id)
    }

    pub fn record_compensation(
        ctx: Context<RecordCompensation>,
        report_id: u64,
        identity: Pubkey,
    ) -> Result<()> {
        compensation::record_compensation(ctx, report_id, identity)
    }

    pub fn retrieve_compensation(ctx: Context<RetrieveCompensation>) -> Result<()> {
        compensation::retrieve_compensation(ctx)
    }

    // ----------------------------
    // Views (return data)
    // ----------------------------
    pub fn is_report_open(ctx: Context<ReportView>, report_id: u64) -> Result<bool> {
        views::is_report_open(ctx, report_id)
    }

    pub fn report_outcome(ctx: Context<ReportView>, report_id: u64) -> Result<Option<bool>> {
        views::report_outcome(ctx, report_id)
    }

    pub fn claimable_weight(ctx: Context<StakeView>, report_id: u64, staker: Pubkey) -> Result<u64> {
        views::claimable_weight(ctx, report_id, staker)
    }

    pub fn is_flagged(ctx: Context<FlagView>, asset: Pubkey, account: Pubkey) -> Result<bool> {
        views::is_flagged(ctx, asset, account)
    }
}
