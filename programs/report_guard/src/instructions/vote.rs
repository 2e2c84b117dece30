use anchor_lang::prelude::*;

use crate::errors::ReportGuardError;
use crate::ReportAction;

pub fn team_vote(ctx: Context<ReportAction>, report_id: u64, vote: bool) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, ReportGuardError::Paused);
    require_keys_eq!(cfg.admin, ctx.accounts.voter.key(), ReportGuardError::Unauthorized);

    let now = Clock::get()?.unix_timestamp;
    let report = &mut ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);
    report.record_team_vote(vote, now)?;

    msg!("report {}: team vote {}", report_id, vote);
    Ok(())
}

pub fn owner_vote(ctx: Context<ReportAction>, report_id: u64, vote: bool) -> Result<()> {
    require!(!ctx.accounts.config.paused, ReportGuardError::Paused);
    require_keys_eq!(
        ctx.accounts.asset_profile.token_owner,
        ctx.accounts.voter.key(),
        ReportGuardError::Unauthorized
    );

    let now = Clock::get()?.unix_timestamp;
    let report = &mut ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);
    report.record_owner_vote(vote, now)?;

    msg!("report {}: owner vote {}", report_id, vote);
    Ok(())
}

pub fn committee_vote(ctx: Context<ReportAction>, report_id: u64, vote: bool) -> Result<()> {
    require!(!ctx.accounts.config.paused, ReportGuardError::Paused);

    let member = ctx.accounts.voter.key();
    let committee = &ctx.accounts.committee;
    require!(committee.is_member(&member), ReportGuardError::NotCommitteeMember);

    let now = Clock::get()?.unix_timestamp;
    let report = &mut ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);
    report.record_committee_vote(member, vote, committee.members.len(), now)?;

    msg!(
        "report {}: committee vote {} by {} ({} ballots, bloc={:?}, {:?})",
        report_id,
        vote,
        member,
        report.ballots.len(),
        report.committee_verdict(),
        report.status(now)
    );
    Ok(())
}
