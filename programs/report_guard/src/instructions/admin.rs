use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ReportGuardError;
use crate::state::{ReportSettings, RewardPercents};
use crate::utils::transfer_signed;
use crate::{
    InitializeConfig, InitializeReportRegistry, RegisterAsset, SetAssetOwner, SetExemption,
    SweepForfeitedStakes, UpdateConfig,
};

pub fn initialize_config(
    ctx: Context<InitializeConfig>,
    recovery_admin: Pubkey,
    pause_admin: Pubkey,
    rewards: RewardPercents,
    settings: ReportSettings,
) -> Result<()> {
    rewards.validate()?;
    settings.validate()?;

    let cfg = &mut ctx.accounts.config;
    cfg.admin = ctx.accounts.admin.key();
    cfg.recovery_admin = recovery_admin;
    cfg.pause_admin = pause_admin;
    cfg.bump = ctx.bumps.config;
    cfg.paused = false;

    cfg.stake_mint = ctx.accounts.stake_mint.key();
    cfg.stake_vault = ctx.accounts.stake_vault.key();
    cfg.stake_vault_bump = ctx.bumps.stake_vault;

    cfg.rewards = rewards;
    cfg.apply_settings(&settings);
    cfg.config_version = 1;
    cfg.forfeited_balance = 0;
    cfg.version = INITIAL_VERSION;

    msg!("config initialized: admin={}", cfg.admin);
    Ok(())
}

pub fn initialize_report_registry(ctx: Context<InitializeReportRegistry>) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ReportGuardError::Unauthorized);

    let rr = &mut ctx.accounts.report_registry;
    rr.admin = cfg.admin;
    rr.bump = ctx.bumps.report_registry;
    rr.next_report_id = INITIAL_REPORT_ID;
    rr.version = INITIAL_VERSION;

    Ok(())
}

pub fn update_reward_config(ctx: Context<UpdateConfig>, rewards: RewardPercents) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.authority.key(), ReportGuardError::Unauthorized);
    rewards.validate()?;

    cfg.rewards = rewards;
    cfg.bump_config_version()?;

    msg!(
        "reward config v{}: reporter={} team={} committee={} staker={}",
        cfg.config_version,
        rewards.reporter,
        rewards.team,
        rewards.committee,
        rewards.staker
    );
    Ok(())
}

pub fn update_report_settings(ctx: Context<UpdateConfig>, settings: ReportSettings) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.authority.key(), ReportGuardError::Unauthorized);
    settings.validate()?;

    cfg.apply_settings(&settings);
    cfg.bump_config_version()?;

    Ok(())
}

pub fn set_pause(ctx: Context<UpdateConfig>, paused: bool) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.pause_admin, ctx.accounts.authority.key(), ReportGuardError::Unauthorized);
    cfg.paused = paused;
    msg!("paused={}", paused);
    Ok(())
}

pub fn set_pause_admin(ctx: Context<UpdateConfig>, pause_admin: Pubkey) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.authority.key(), ReportGuardError::Unauthorized);
    cfg.pause_admin = pause_admin;
    Ok(())
}

/// Recovery path: the recovery admin can replace the operating admin.
pub fn set_admin(ctx: Context<UpdateConfig>, new_admin: Pubkey) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(
        cfg.recovery_admin,
        ctx.accounts.authority.key(),
        ReportGuardError::Unauthorized
    );
    require!(new_admin != Pubkey::default(), ReportGuardError::ZeroWallet);
    cfg.admin = new_admin;
    msg!("admin set to {}", new_admin);
    Ok(())
}

pub fn set_recovery_admin(ctx: Context<UpdateConfig>, new_recovery_admin: Pubkey) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(
        cfg.recovery_admin,
        ctx.accounts.authority.key(),
        ReportGuardError::Unauthorized
    );
    require!(new_recovery_admin != Pubkey::default(), ReportGuardError::ZeroWallet);
    cfg.recovery_admin = new_recovery_admin;
    Ok(())
}

pub fn register_asset(ctx: Context<RegisterAsset>, token_owner: Pubkey) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ReportGuardError::Unauthorized);

    // Freezing and thawing are CPIs signed by the config PDA. Seizing a confirmed
    // balance also needs it as permanent delegate, which the transfer enforces.
    let mint = &ctx.accounts.asset_mint;
    require!(
        Option::<Pubkey>::from(mint.freeze_authority) == Some(cfg.key()),
        ReportGuardError::FreezeAuthorityMismatch
    );

    let asset = &mut ctx.accounts.asset_profile;
    asset.mint = mint.key();
    asset.token_owner = token_owner;
    asset.bump = ctx.bumps.asset_profile;
    asset.registered_at = Clock::get()?.unix_timestamp;

    msg!("asset registered: mint={} owner={}", asset.mint, token_owner);
    Ok(())
}

pub fn set_asset_owner(ctx: Context<SetAssetOwner>, token_owner: Pubkey) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ReportGuardError::Unauthorized);

    ctx.accounts.asset_profile.token_owner = token_owner;
    Ok(())
}

pub fn set_exemption(ctx: Context<SetExemption>, address: Pubkey, exempt: bool) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ReportGuardError::Unauthorized);

    let ex = &mut ctx.accounts.exemption;
    ex.address = address;
    ex.exempt = exempt;
    ex.bump = ctx.bumps.exemption;

    msg!("exemption {}={}", address, exempt);
    Ok(())
}

/// Moves forfeited stake out of the stake vault. `amount == 0` sweeps everything.
pub fn sweep_forfeited_stakes(ctx: Context<SweepForfeitedStakes>, amount: u64) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ReportGuardError::Unauthorized);

    let amount = if amount == 0 { cfg.forfeited_balance } else { amount };
    require!(amount > 0, ReportGuardError::NothingOwed);
    require!(amount <= cfg.forfeited_balance, ReportGuardError::InsufficientFunds);
    cfg.forfeited_balance -= amount;

    let signer_seeds: &[&[&[u8]]] = &[&[crate::CONFIG_SEED, &[cfg.bump]]];
    transfer_signed(
        &ctx.accounts.token_program,
        &ctx.accounts.stake_vault,
        &ctx.accounts.destination,
        cfg.to_account_info(),
        signer_seeds,
        amount,
    )?;

    msg!("swept {} forfeited stake, {} left", amount, cfg.forfeited_balance);
    Ok(())
}
