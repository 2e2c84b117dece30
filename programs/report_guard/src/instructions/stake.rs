use anchor_lang::prelude::*;

use crate::errors::ReportGuardError;
use crate::utils::{read_flag_blocks, transfer_from_user};
use crate::StakeOnReport;

pub fn stake(ctx: Context<StakeOnReport>, report_id: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, ReportGuardError::Paused);

    let now = Clock::get()?.unix_timestamp;
    let staker = ctx.accounts.staker.key();

    require!(
        !read_flag_blocks(&ctx.accounts.staker_flag.to_account_info(), ctx.program_id, now)?,
        ReportGuardError::StakerFlagged
    );

    let report = &mut ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);

    ctx.accounts
        .stake_record
        .open(report_id, staker, ctx.bumps.stake_record, now)?;
    report.record_stake(staker, now)?;

    transfer_from_user(
        &ctx.accounts.token_program,
        &ctx.accounts.staker_stake_account,
        &ctx.accounts.stake_vault,
        &ctx.accounts.staker,
        report.terms.staking_amount,
    )?;

    msg!(
        "report {}: stake by {} (stakers={})",
        report_id,
        staker,
        report.staker_count
    );
    Ok(())
}
