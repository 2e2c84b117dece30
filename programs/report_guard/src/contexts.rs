// programs/report_guard/src/contexts.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use anchor_spl::token_interface::{Mint as AssetMint, TokenAccount as AssetAccount, TokenInterface};

use crate::errors::ReportGuardError;
use crate::state::{
    AssetProfile, Committee, Compensation, Config, Exemption, FlagRecord, Report, ReportRegistry,
    StakeRecord,
};

// ----------------------------
// Setup / admin
// ----------------------------

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [crate::CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, Config>,

    pub stake_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = admin,
        seeds = [crate::STAKE_VAULT_SEED, config.key().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = config
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct InitializeReportRegistry<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = admin,
        space = 8 + ReportRegistry::INIT_SPACE,
        seeds = [crate::REPORT_REGISTRY_SEED, config.key().as_ref()],
        bump
    )]
    pub report_registry: Account<'info, ReportRegistry>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Shared by every config mutation. Handlers check which role `authority` must hold.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct InitializeCommittee<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = admin,
        space = 8 + Committee::INIT_SPACE,
        seeds = [crate::COMMITTEE_SEED, config.key().as_ref()],
        bump
    )]
    pub committee: Account<'info, Committee>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ManageCommittee<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::COMMITTEE_SEED, config.key().as_ref()],
        bump = committee.bump,
    )]
    pub committee: Account<'info, Committee>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct RegisterAsset<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    pub asset_mint: InterfaceAccount<'info, AssetMint>,

    #[account(
        init,
        payer = admin,
        space = 8 + AssetProfile::INIT_SPACE,
        seeds = [crate::ASSET_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub asset_profile: Account<'info, AssetProfile>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct SetAssetOwner<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::ASSET_SEED, asset_profile.mint.as_ref()],
        bump = asset_profile.bump,
    )]
    pub asset_profile: Account<'info, AssetProfile>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(address: Pubkey)]
pub struct SetExemption<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + Exemption::INIT_SPACE,
        seeds = [crate::EXEMPT_SEED, address.as_ref()],
        bump
    )]
    pub exemption: Account<'info, Exemption>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct SweepForfeitedStakes<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(mut, address = config.stake_vault)]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination.mint == config.stake_mint @ ReportGuardError::MintMismatch,
    )]
    pub destination: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

// ----------------------------
// Reports
// ----------------------------

#[derive(Accounts)]
pub struct CreateReport<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::REPORT_REGISTRY_SEED, config.key().as_ref()],
        bump = report_registry.bump,
    )]
    pub report_registry: Account<'info, ReportRegistry>,

    #[account(
        seeds = [crate::COMMITTEE_SEED, config.key().as_ref()],
        bump = committee.bump,
    )]
    pub committee: Account<'info, Committee>,

    #[account(
        seeds = [crate::ASSET_SEED, asset_mint.key().as_ref()],
        bump = asset_profile.bump,
    )]
    pub asset_profile: Account<'info, AssetProfile>,

    #[account(address = asset_profile.mint)]
    pub asset_mint: InterfaceAccount<'info, AssetMint>,

    #[account(
        mut,
        constraint = flagged_token_account.mint == asset_mint.key() @ ReportGuardError::MintMismatch,
    )]
    pub flagged_token_account: InterfaceAccount<'info, AssetAccount>,

    #[account(
        init_if_needed,
        payer = reporter,
        space = 8 + FlagRecord::INIT_SPACE,
        seeds = [crate::FLAG_SEED, asset_mint.key().as_ref(), flagged_token_account.owner.as_ref()],
        bump
    )]
    pub flag: Account<'info, FlagRecord>,

    /// CHECK: Exemption PDA of the flagged identity; may not exist. Deserialized by hand.
    #[account(
        seeds = [crate::EXEMPT_SEED, flagged_token_account.owner.as_ref()],
        bump
    )]
    pub exemption: UncheckedAccount<'info>,

    #[account(
        init,
        payer = reporter,
        space = 8 + Report::INIT_SPACE,
        seeds = [crate::REPORT_SEED, report_registry.next_report_id.to_le_bytes().as_ref()],
        bump
    )]
    pub report: Account<'info, Report>,

    #[account(
        init,
        payer = reporter,
        seeds = [crate::REPORT_VAULT_SEED, report_registry.next_report_id.to_le_bytes().as_ref()],
        bump,
        token::mint = asset_mint,
        token::authority = report,
        token::token_program = asset_token_program
    )]
    pub report_vault: InterfaceAccount<'info, AssetAccount>,

    #[account(mut, address = config.stake_vault)]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = reporter_stake_account.owner == reporter.key() @ ReportGuardError::Unauthorized,
        constraint = reporter_stake_account.mint == config.stake_mint @ ReportGuardError::MintMismatch,
    )]
    pub reporter_stake_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub reporter: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub asset_token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
#[instruction(report_id: u64)]
pub struct ExtendReport<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::REPORT_SEED, report_id.to_le_bytes().as_ref()],
        bump = report.bump,
    )]
    pub report: Account<'info, Report>,

    #[account(address = report.asset)]
    pub asset_mint: InterfaceAccount<'info, AssetMint>,

    #[account(
        mut,
        constraint = second_token_account.mint == report.asset @ ReportGuardError::MintMismatch,
    )]
    pub second_token_account: InterfaceAccount<'info, AssetAccount>,

    #[account(
        init_if_needed,
        payer = reporter,
        space = 8 + FlagRecord::INIT_SPACE,
        seeds = [crate::FLAG_SEED, report.asset.as_ref(), second_token_account.owner.as_ref()],
        bump
    )]
    pub flag: Account<'info, FlagRecord>,

    /// CHECK: Exemption PDA of the second identity; may not exist.
    #[account(
        seeds = [crate::EXEMPT_SEED, second_token_account.owner.as_ref()],
        bump
    )]
    pub exemption: UncheckedAccount<'info>,

    #[account(mut)]
    pub reporter: Signer<'info>,

    pub asset_token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(report_id: u64)]
pub struct StakeOnReport<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::REPORT_SEED, report_id.to_le_bytes().as_ref()],
        bump = report.bump,
    )]
    pub report: Account<'info, Report>,

    #[account(
        init_if_needed,
        payer = staker,
        space = 8 + StakeRecord::INIT_SPACE,
        seeds = [crate::STAKE_SEED, report_id.to_le_bytes().as_ref(), staker.key().as_ref()],
        bump
    )]
    pub stake_record: Account<'info, StakeRecord>,

    /// CHECK: staker's own FlagRecord for this asset; may not exist.
    #[account(
        seeds = [crate::FLAG_SEED, report.asset.as_ref(), staker.key().as_ref()],
        bump
    )]
    pub staker_flag: UncheckedAccount<'info>,

    #[account(mut, address = config.stake_vault)]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = staker_stake_account.owner == staker.key() @ ReportGuardError::Unauthorized,
        constraint = staker_stake_account.mint == config.stake_mint @ ReportGuardError::MintMismatch,
    )]
    pub staker_stake_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub staker: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Votes (all three blocs) and treasury wallet proposals/rejections.
#[derive(Accounts)]
#[instruction(report_id: u64)]
pub struct ReportAction<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::REPORT_SEED, report_id.to_le_bytes().as_ref()],
        bump = report.bump,
    )]
    pub report: Account<'info, Report>,

    #[account(
        seeds = [crate::ASSET_SEED, report.asset.as_ref()],
        bump = asset_profile.bump,
    )]
    pub asset_profile: Account<'info, AssetProfile>,

    #[account(
        seeds = [crate::COMMITTEE_SEED, config.key().as_ref()],
        bump = committee.bump,
    )]
    pub committee: Account<'info, Committee>,

    pub voter: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(report_id: u64)]
pub struct ResolveReport<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::REPORT_SEED, report_id.to_le_bytes().as_ref()],
        bump = report.bump,
    )]
    pub report: Account<'info, Report>,

    #[account(address = report.asset)]
    pub asset_mint: InterfaceAccount<'info, AssetMint>,

    #[account(
        mut,
        seeds = [crate::FLAG_SEED, report.asset.as_ref(), report.primary_account.as_ref()],
        bump = primary_flag.bump,
    )]
    pub primary_flag: Account<'info, FlagRecord>,

    #[account(mut, address = report.primary_token_account)]
    pub primary_token_account: InterfaceAccount<'info, AssetAccount>,

    /// Required when the report was extended.
    #[account(mut)]
    pub secondary_flag: Option<Account<'info, FlagRecord>>,

    #[account(mut)]
    pub secondary_token_account: Option<InterfaceAccount<'info, AssetAccount>>,

    pub asset_token_program: Interface<'info, TokenInterface>,
}

/// Permissionless once the report is confirmed. The config PDA must be the
/// asset mint's permanent delegate.
#[derive(Accounts)]
#[instruction(report_id: u64)]
pub struct ReleaseFrozenFunds<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::REPORT_SEED, report_id.to_le_bytes().as_ref()],
        bump = report.bump,
    )]
    pub report: Account<'info, Report>,

    #[account(address = report.asset)]
    pub asset_mint: InterfaceAccount<'info, AssetMint>,

    #[account(mut, address = report.vault)]
    pub report_vault: InterfaceAccount<'info, AssetAccount>,

    #[account(mut, address = report.primary_token_account)]
    pub primary_token_account: InterfaceAccount<'info, AssetAccount>,

    /// Required when the report was extended.
    #[account(mut)]
    pub secondary_token_account: Option<InterfaceAccount<'info, AssetAccount>>,

    pub asset_token_program: Interface<'info, TokenInterface>,
}

#[derive(Accounts)]
#[instruction(report_id: u64, identity: Pubkey)]
pub struct RecordCompensation<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::REPORT_SEED, report_id.to_le_bytes().as_ref()],
        bump = report.bump,
    )]
    pub report: Account<'info, Report>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Compensation::INIT_SPACE,
        seeds = [crate::COMPENSATION_SEED, identity.as_ref()],
        bump
    )]
    pub compensation: Account<'info, Compensation>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

// ----------------------------
// Claims
// ----------------------------

#[derive(Accounts)]
#[instruction(report_id: u64)]
pub struct ReporterClaim<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::REPORT_SEED, report_id.to_le_bytes().as_ref()],
        bump = report.bump,
    )]
    pub report: Account<'info, Report>,

    #[account(address = report.asset)]
    pub asset_mint: InterfaceAccount<'info, AssetMint>,

    #[account(mut, address = report.vault)]
    pub report_vault: InterfaceAccount<'info, AssetAccount>,

    #[account(mut, address = config.stake_vault)]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = reporter_asset_account.mint == report.asset @ ReportGuardError::MintMismatch,
    )]
    pub reporter_asset_account: InterfaceAccount<'info, AssetAccount>,

    #[account(
        mut,
        constraint = reporter_stake_account.mint == config.stake_mint @ ReportGuardError::MintMismatch,
    )]
    pub reporter_stake_account: Account<'info, TokenAccount>,

    pub reporter: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub asset_token_program: Interface<'info, TokenInterface>,
}

/// Team and committee shares: asset only, paid from the report vault.
#[derive(Accounts)]
#[instruction(report_id: u64)]
pub struct ClaimShare<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::REPORT_SEED, report_id.to_le_bytes().as_ref()],
        bump = report.bump,
    )]
    pub report: Account<'info, Report>,

    #[account(address = report.asset)]
    pub asset_mint: InterfaceAccount<'info, AssetMint>,

    #[account(mut, address = report.vault)]
    pub report_vault: InterfaceAccount<'info, AssetAccount>,

    #[account(
        mut,
        constraint = destination.mint == report.asset @ ReportGuardError::MintMismatch,
    )]
    pub destination: InterfaceAccount<'info, AssetAccount>,

    pub claimant: Signer<'info>,

    pub asset_token_program: Interface<'info, TokenInterface>,
}

#[derive(Accounts)]
#[instruction(report_id: u64)]
pub struct StakerClaim<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [crate::REPORT_SEED, report_id.to_le_bytes().as_ref()],
        bump = report.bump,
    )]
    pub report: Account<'info, Report>,

    #[account(
        mut,
        seeds = [crate::STAKE_SEED, report_id.to_le_bytes().as_ref(), staker.key().as_ref()],
        bump = stake_record.bump,
        has_one = staker @ ReportGuardError::NotStaker,
    )]
    pub stake_record: Account<'info, StakeRecord>,

    #[account(address = report.asset)]
    pub asset_mint: InterfaceAccount<'info, AssetMint>,

    #[account(mut, address = report.vault)]
    pub report_vault: InterfaceAccount<'info, AssetAccount>,

    #[account(mut, address = config.stake_vault)]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = staker_asset_account.mint == report.asset @ ReportGuardError::MintMismatch,
    )]
    pub staker_asset_account: InterfaceAccount<'info, AssetAccount>,

    #[account(
        mut,
        constraint = staker_stake_account.mint == config.stake_mint @ ReportGuardError::MintMismatch,
    )]
    pub staker_stake_account: Account<'info, TokenAccount>,

    pub staker: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub asset_token_program: Interface<'info, TokenInterface>,
}

#[derive(Accounts)]
#[instruction(report_id: u64)]
pub struct RetrieveFunds<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::REPORT_SEED, report_id.to_le_bytes().as_ref()],
        bump = report.bump,
    )]
    pub report: Account<'info, Report>,

    #[account(address = report.asset)]
    pub asset_mint: InterfaceAccount<'info, AssetMint>,

    #[account(mut, address = report.vault)]
    pub report_vault: InterfaceAccount<'info, AssetAccount>,

    #[account(
        mut,
        constraint = destination.mint == report.asset @ ReportGuardError::MintMismatch,
    )]
    pub destination: InterfaceAccount<'info, AssetAccount>,

    pub wallet: Signer<'info>,

    pub asset_token_program: Interface<'info, TokenInterface>,
}

#[derive(Accounts)]
pub struct RetrieveCompensation<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::COMPENSATION_SEED, claimant.key().as_ref()],
        bump = compensation.bump,
    )]
    pub compensation: Account<'info, Compensation>,

    #[account(mut, address = config.stake_vault)]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination.mint == config.stake_mint @ ReportGuardError::MintMismatch,
    )]
    pub destination: Account<'info, TokenAccount>,

    pub claimant: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

// ----------------------------
// Views
// ----------------------------

#[derive(Accounts)]
#[instruction(report_id: u64)]
pub struct ReportView<'info> {
    #[account(
        seeds = [crate::REPORT_SEED, report_id.to_le_bytes().as_ref()],
        bump = report.bump,
    )]
    pub report: Account<'info, Report>,
}

#[derive(Accounts)]
#[instruction(asset: Pubkey, account: Pubkey)]
pub struct FlagView<'info> {
    /// CHECK: FlagRecord PDA for (asset, account); may not exist.
    #[account(
        seeds = [crate::FLAG_SEED, asset.as_ref(), account.as_ref()],
        bump
    )]
    pub flag: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(report_id: u64, staker: Pubkey)]
pub struct StakeView<'info> {
    #[account(
        seeds = [crate::REPORT_SEED, report_id.to_le_bytes().as_ref()],
        bump = report.bump,
    )]
    pub report: Account<'info, Report>,

    #[account(
        seeds = [crate::STAKE_SEED, report_id.to_le_bytes().as_ref(), staker.as_ref()],
        bump = stake_record.bump,
    )]
    pub stake_record: Account<'info, StakeRecord>,
}
