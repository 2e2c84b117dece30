use anchor_lang::prelude::*;

use crate::errors::ReportGuardError;
use crate::utils::transfer_signed;
use crate::{RecordCompensation, RetrieveCompensation};

/// Moves a wrongly flagged identity's share of a rejected report's compensation
/// into its index. Anyone may pay the rent; the share goes to `identity` only.
pub fn record_compensation(
    ctx: Context<RecordCompensation>,
    report_id: u64,
    identity: Pubkey,
) -> Result<()> {
    require!(!ctx.accounts.config.paused, ReportGuardError::Paused);

    let report = &mut ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);
    let amount = report.take_compensation(identity)?;

    let compensation = &mut ctx.accounts.compensation;
    if compensation.identity == Pubkey::default() {
        compensation.identity = identity;
        compensation.bump = ctx.bumps.compensation;
    }
    compensation.record(amount)?;

    msg!(
        "report {}: compensation {} recorded for {} ({} pending)",
        report_id,
        amount,
        identity,
        compensation.pending_reports
    );
    Ok(())
}

/// Pays every compensation entry accrued for the signer since the last retrieval.
pub fn retrieve_compensation(ctx: Context<RetrieveCompensation>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, ReportGuardError::Paused);

    let claimant = ctx.accounts.claimant.key();
    let amount = ctx.accounts.compensation.take_owed(claimant)?;

    let signer_seeds: &[&[&[u8]]] = &[&[crate::CONFIG_SEED, &[cfg.bump]]];
    transfer_signed(
        &ctx.accounts.token_program,
        &ctx.accounts.stake_vault,
        &ctx.accounts.destination,
        cfg.to_account_info(),
        signer_seeds,
        amount,
    )?;

    msg!("compensation of {} paid to {}", amount, claimant);
    Ok(())
}
