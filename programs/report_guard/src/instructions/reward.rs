use anchor_lang::prelude::*;

use crate::errors::ReportGuardError;
use crate::utils::{transfer_asset_signed, transfer_signed};
use crate::{ClaimShare, ReporterClaim, StakerClaim};

/// Pays the stake refund once the report is confirmed and the asset reward once
/// the frozen funds are in the vault. Call again after release for the reward.
pub fn reporter_claim(ctx: Context<ReporterClaim>, report_id: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, ReportGuardError::Paused);

    let report = &mut ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);

    let (refund, reward) = report.take_reporter_payout(ctx.accounts.reporter.key())?;

    // 1) asset reward from the report vault
    let id_le = report_id.to_le_bytes();
    let report_seeds: &[&[&[u8]]] = &[&[crate::REPORT_SEED, &id_le, &[report.bump]]];
    transfer_asset_signed(
        &ctx.accounts.asset_token_program,
        &ctx.accounts.report_vault,
        &ctx.accounts.asset_mint,
        &ctx.accounts.reporter_asset_account,
        report.to_account_info(),
        report_seeds,
        reward,
    )?;

    // 2) report stake back from the stake vault
    let config_seeds: &[&[&[u8]]] = &[&[crate::CONFIG_SEED, &[cfg.bump]]];
    transfer_signed(
        &ctx.accounts.token_program,
        &ctx.accounts.stake_vault,
        &ctx.accounts.reporter_stake_account,
        cfg.to_account_info(),
        config_seeds,
        refund,
    )?;

    msg!("report {}: reporter claimed {} (+{} stake)", report_id, reward, refund);
    Ok(())
}

pub fn team_claim(ctx: Context<ClaimShare>, report_id: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, ReportGuardError::Paused);
    require_keys_eq!(cfg.admin, ctx.accounts.claimant.key(), ReportGuardError::Unauthorized);

    let report = &mut ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);
    let reward = report.take_team_claim()?;

    let id_le = report_id.to_le_bytes();
    let report_seeds: &[&[&[u8]]] = &[&[crate::REPORT_SEED, &id_le, &[report.bump]]];
    transfer_asset_signed(
        &ctx.accounts.asset_token_program,
        &ctx.accounts.report_vault,
        &ctx.accounts.asset_mint,
        &ctx.accounts.destination,
        report.to_account_info(),
        report_seeds,
        reward,
    )?;

    msg!("report {}: team claimed {}", report_id, reward);
    Ok(())
}

/// Paid to members who cast a ballot on this report, whether or not they are
/// still on the committee.
pub fn committee_member_claim(ctx: Context<ClaimShare>, report_id: u64) -> Result<()> {
    require!(!ctx.accounts.config.paused, ReportGuardError::Paused);

    let member = ctx.accounts.claimant.key();
    let report = &mut ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);
    let reward = report.take_committee_claim(member)?;

    let id_le = report_id.to_le_bytes();
    let report_seeds: &[&[&[u8]]] = &[&[crate::REPORT_SEED, &id_le, &[report.bump]]];
    transfer_asset_signed(
        &ctx.accounts.asset_token_program,
        &ctx.accounts.report_vault,
        &ctx.accounts.asset_mint,
        &ctx.accounts.destination,
        report.to_account_info(),
        report_seeds,
        reward,
    )?;

    msg!("report {}: committee member {} claimed {}", report_id, member, reward);
    Ok(())
}

/// Same two-step payout as `reporter_claim`.
pub fn staker_claim(ctx: Context<StakerClaim>, report_id: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, ReportGuardError::Paused);

    let report = &ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);

    let (refund, reward) = ctx.accounts.stake_record.take_payout(report)?;

    let id_le = report_id.to_le_bytes();
    let report_seeds: &[&[&[u8]]] = &[&[crate::REPORT_SEED, &id_le, &[report.bump]]];
    transfer_asset_signed(
        &ctx.accounts.asset_token_program,
        &ctx.accounts.report_vault,
        &ctx.accounts.asset_mint,
        &ctx.accounts.staker_asset_account,
        report.to_account_info(),
        report_seeds,
        reward,
    )?;

    let config_seeds: &[&[&[u8]]] = &[&[crate::CONFIG_SEED, &[cfg.bump]]];
    transfer_signed(
        &ctx.accounts.token_program,
        &ctx.accounts.stake_vault,
        &ctx.accounts.staker_stake_account,
        cfg.to_account_info(),
        config_seeds,
        refund,
    )?;

    msg!(
        "report {}: staker {} claimed {} (+{} stake)",
        report_id,
        ctx.accounts.staker.key(),
        reward,
        refund
    );
    Ok(())
}
