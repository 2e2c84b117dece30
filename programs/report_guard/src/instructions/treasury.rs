use anchor_lang::prelude::*;

use crate::errors::ReportGuardError;
use crate::state::WalletRejector;
use crate::utils::transfer_asset_signed;
use crate::{ReportAction, RetrieveFunds};

pub fn propose_wallet(ctx: Context<ReportAction>, report_id: u64, wallet: Pubkey) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, ReportGuardError::Paused);

    let caller = ctx.accounts.voter.key();
    require!(
        caller == cfg.admin || caller == ctx.accounts.asset_profile.token_owner,
        ReportGuardError::Unauthorized
    );

    let now = Clock::get()?.unix_timestamp;
    let report = &mut ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);
    report.propose_wallet(wallet, now)?;

    msg!(
        "report {}: wallet {} proposed, dispute until {}",
        report_id,
        wallet,
        report.dispute_deadline()
    );
    Ok(())
}

/// One rejection per bloc per proposal. The caller's role picks the bloc:
/// admin first, then token owner, then committee membership.
pub fn reject_wallet(ctx: Context<ReportAction>, report_id: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, ReportGuardError::Paused);

    let caller = ctx.accounts.voter.key();
    let committee = &ctx.accounts.committee;
    let rejector = if caller == cfg.admin {
        WalletRejector::Team
    } else if caller == ctx.accounts.asset_profile.token_owner {
        WalletRejector::Owner
    } else if committee.is_member(&caller) {
        WalletRejector::Committee(caller)
    } else {
        return err!(ReportGuardError::Unauthorized);
    };

    let now = Clock::get()?.unix_timestamp;
    let report = &mut ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);
    let rejected = report.reject_wallet(rejector, committee.members.len(), now)?;

    msg!(
        "report {}: wallet rejection by {:?}, rejected={}",
        report_id,
        rejector,
        rejected
    );
    Ok(())
}

pub fn retrieve_funds(ctx: Context<RetrieveFunds>, report_id: u64) -> Result<()> {
    require!(!ctx.accounts.config.paused, ReportGuardError::Paused);

    let now = Clock::get()?.unix_timestamp;
    let report = &mut ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);
    let amount = report.take_retrieval(ctx.accounts.wallet.key(), now)?;

    let id_le = report_id.to_le_bytes();
    let report_seeds: &[&[&[u8]]] = &[&[crate::REPORT_SEED, &id_le, &[report.bump]]];
    transfer_asset_signed(
        &ctx.accounts.asset_token_program,
        &ctx.accounts.report_vault,
        &ctx.accounts.asset_mint,
        &ctx.accounts.destination,
        report.to_account_info(),
        report_seeds,
        amount,
    )?;

    msg!("report {}: {} retrieved by treasury wallet", report_id, amount);
    Ok(())
}
