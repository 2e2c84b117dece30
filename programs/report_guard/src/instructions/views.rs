use anchor_lang::prelude::*;

use crate::errors::ReportGuardError;
use crate::utils::read_flag_blocks;
use crate::{FlagView, ReportView, StakeView};

pub fn is_report_open(ctx: Context<ReportView>, report_id: u64) -> Result<bool> {
    let report = &ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);
    Ok(report.is_open(Clock::get()?.unix_timestamp))
}

/// `None` while unresolved.
pub fn report_outcome(ctx: Context<ReportView>, report_id: u64) -> Result<Option<bool>> {
    let report = &ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);
    Ok(report.outcome())
}

pub fn is_flagged(ctx: Context<FlagView>, _asset: Pubkey, _account: Pubkey) -> Result<bool> {
    let now = Clock::get()?.unix_timestamp;
    read_flag_blocks(&ctx.accounts.flag.to_account_info(), ctx.program_id, now)
}

/// Current stake weight. Fixed once the report resolves.
pub fn claimable_weight(ctx: Context<StakeView>, report_id: u64, _staker: Pubkey) -> Result<u64> {
    let report = &ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);
    let stake = &ctx.accounts.stake_record;
    require!(stake.staked, ReportGuardError::NotStaker);
    Ok(report.claimable_weight(stake.staked_at, Clock::get()?.unix_timestamp))
}
