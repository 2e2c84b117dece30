use anchor_lang::prelude::*;

use crate::errors::ReportGuardError;
use crate::utils::{
    freeze_token_account, read_exemption, seize_frozen_balance, thaw_token_account,
    transfer_from_user, validate_report_target,
};
use crate::{CreateReport, ExtendReport, ReleaseFrozenFunds, ResolveReport};

pub fn create_report(ctx: Context<CreateReport>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, ReportGuardError::Paused);

    let now = Clock::get()?.unix_timestamp;
    let reporter = ctx.accounts.reporter.key();
    let flagged = &ctx.accounts.flagged_token_account;
    let target = flagged.owner;

    let exempt = read_exemption(&ctx.accounts.exemption.to_account_info(), ctx.program_id)?;
    validate_report_target(
        &target,
        &reporter,
        &[cfg.key(), *ctx.program_id, cfg.stake_vault],
        exempt,
    )?;

    let flag = &mut ctx.accounts.flag;
    flag.check_reportable(now)?;

    // 1) report fee into the stake vault
    transfer_from_user(
        &ctx.accounts.token_program,
        &ctx.accounts.reporter_stake_account,
        &ctx.accounts.stake_vault,
        &ctx.accounts.reporter,
        cfg.report_stake,
    )?;

    // 2) freeze the flagged account (config PDA is the mint's freeze authority)
    let signer_seeds: &[&[&[u8]]] = &[&[crate::CONFIG_SEED, &[cfg.bump]]];
    freeze_token_account(
        &ctx.accounts.asset_token_program,
        flagged,
        &ctx.accounts.asset_mint,
        cfg.to_account_info(),
        signer_seeds,
    )?;

    // 3) report state
    let registry = &mut ctx.accounts.report_registry;
    let report_id = registry.next_report_id;
    let lifetime_end = now
        .checked_add(cfg.report_lifetime)
        .ok_or(ReportGuardError::MathOverflow)?;

    let report = &mut ctx.accounts.report;
    report.id = report_id;
    report.bump = ctx.bumps.report;
    report.asset = ctx.accounts.asset_mint.key();
    report.reporter = reporter;
    report.primary_account = target;
    report.primary_token_account = flagged.key();
    report.secondary_account = None;
    report.secondary_token_account = None;

    report.vault = ctx.accounts.report_vault.key();
    report.vault_bump = ctx.bumps.report_vault;

    report.created_at = now;
    report.lifetime_end = lifetime_end;
    report.terms = cfg.snapshot_terms();
    report.frozen_balance = flagged.amount;

    report.team_vote = None;
    report.owner_vote = None;
    report.committee_quorum = ctx.accounts.committee.quorum;
    report.ballots = Vec::new();

    report.staker_count = 0;
    report.staked_at_sum = 0;
    report.resolved = false;

    flag.take(
        report.asset,
        target,
        flagged.key(),
        report_id,
        lifetime_end,
        ctx.bumps.flag,
    );

    registry.next_report_id = report_id
        .checked_add(1)
        .ok_or(ReportGuardError::MathOverflow)?;

    msg!(
        "report {} opened: asset={} account={} frozen={}",
        report_id,
        report.asset,
        target,
        report.frozen_balance
    );
    Ok(())
}

pub fn extend_report(ctx: Context<ExtendReport>, report_id: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, ReportGuardError::Paused);

    let now = Clock::get()?.unix_timestamp;
    let reporter = ctx.accounts.reporter.key();
    let second = &ctx.accounts.second_token_account;
    let target = second.owner;

    let report = &mut ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);

    let exempt = read_exemption(&ctx.accounts.exemption.to_account_info(), ctx.program_id)?;
    validate_report_target(
        &target,
        &reporter,
        &[cfg.key(), *ctx.program_id, cfg.stake_vault],
        exempt,
    )?;

    let flag = &mut ctx.accounts.flag;
    flag.check_reportable(now)?;

    report.extend(reporter, target, second.key(), second.amount, now)?;

    let signer_seeds: &[&[&[u8]]] = &[&[crate::CONFIG_SEED, &[cfg.bump]]];
    freeze_token_account(
        &ctx.accounts.asset_token_program,
        second,
        &ctx.accounts.asset_mint,
        cfg.to_account_info(),
        signer_seeds,
    )?;

    flag.take(
        report.asset,
        target,
        second.key(),
        report_id,
        report.lifetime_end,
        ctx.bumps.flag,
    );

    msg!("report {} extended: account={}", report_id, target);
    Ok(())
}

/// Settles a report. Callable by anyone; after the lifetime elapses this is how
/// an undecided report is closed out.
pub fn resolve_report(ctx: Context<ResolveReport>, report_id: u64) -> Result<()> {
    require!(!ctx.accounts.config.paused, ReportGuardError::Paused);
    let now = Clock::get()?.unix_timestamp;

    let report = &mut ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);

    let outcome = report.resolve(now)?;

    let cfg = &mut ctx.accounts.config;
    let bump = cfg.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[crate::CONFIG_SEED, &[bump]]];

    // primary account
    let primary_flag = &mut ctx.accounts.primary_flag;
    if primary_flag.settle(report_id, outcome) {
        thaw_token_account(
            &ctx.accounts.asset_token_program,
            &ctx.accounts.primary_token_account,
            &ctx.accounts.asset_mint,
            cfg.to_account_info(),
            signer_seeds,
        )?;
    }

    // secondary account, when the report was extended
    if let Some(secondary) = report.secondary_account {
        let flag = ctx
            .accounts
            .secondary_flag
            .as_mut()
            .ok_or(ReportGuardError::InvalidTarget)?;
        let token_account = ctx
            .accounts
            .secondary_token_account
            .as_ref()
            .ok_or(ReportGuardError::InvalidTarget)?;

        let (expected_flag, _) = Pubkey::find_program_address(
            &[crate::FLAG_SEED, report.asset.as_ref(), secondary.as_ref()],
            ctx.program_id,
        );
        require_keys_eq!(flag.key(), expected_flag, ReportGuardError::InvalidTarget);
        require!(
            Some(token_account.key()) == report.secondary_token_account,
            ReportGuardError::InvalidTarget
        );

        if flag.settle(report_id, outcome) {
            thaw_token_account(
                &ctx.accounts.asset_token_program,
                token_account,
                &ctx.accounts.asset_mint,
                cfg.to_account_info(),
                signer_seeds,
            )?;
        }
    }

    // Compensation stays on the report until each flagged identity records it.
    if !outcome {
        let forfeited = report
            .forfeited_stake()?
            .checked_sub(report.compensation_owed)
            .ok_or(ReportGuardError::MathOverflow)?;
        cfg.forfeited_balance = cfg
            .forfeited_balance
            .checked_add(forfeited)
            .ok_or(ReportGuardError::MathOverflow)?;
    }

    msg!(
        "report {} resolved: outcome={} team={:?} owner={:?} committee={:?}",
        report_id,
        outcome,
        report.team_vote,
        report.owner_vote,
        report.committee_verdict()
    );
    Ok(())
}

/// Sweeps the frozen balance of a confirmed report's flagged account(s) into its
/// vault. The accounts stay frozen afterwards.
pub fn release_frozen_funds(ctx: Context<ReleaseFrozenFunds>, report_id: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, ReportGuardError::Paused);

    let report = &mut ctx.accounts.report;
    require!(report.id == report_id, ReportGuardError::ReportNotFound);
    report.require_confirmed()?;

    let signer_seeds: &[&[&[u8]]] = &[&[crate::CONFIG_SEED, &[cfg.bump]]];
    let mut seized = seize_frozen_balance(
        &ctx.accounts.asset_token_program,
        &ctx.accounts.primary_token_account,
        &ctx.accounts.asset_mint,
        &ctx.accounts.report_vault,
        cfg.to_account_info(),
        signer_seeds,
    )?;

    if let Some(expected) = report.secondary_token_account {
        let second = ctx
            .accounts
            .secondary_token_account
            .as_ref()
            .ok_or(ReportGuardError::InvalidTarget)?;
        require_keys_eq!(second.key(), expected, ReportGuardError::InvalidTarget);
        let amount = seize_frozen_balance(
            &ctx.accounts.asset_token_program,
            second,
            &ctx.accounts.asset_mint,
            &ctx.accounts.report_vault,
            cfg.to_account_info(),
            signer_seeds,
        )?;
        seized = seized
            .checked_add(amount)
            .ok_or(ReportGuardError::MathOverflow)?;
    }

    let frozen = report.release_funds(seized)?;

    msg!("report {}: seized {} into vault (frozen {})", report_id, seized, frozen);
    Ok(())
}
