use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use anchor_spl::token_interface::{
    self, FreezeAccount, Mint as AssetMint, ThawAccount, TokenAccount as AssetAccount,
    TokenInterface, TransferChecked,
};

use crate::{
    constants::PERCENT_BASE,
    errors::ReportGuardError,
    state::{Exemption, FlagRecord, RewardPercents},
};

// -------------------------
// Reward math
// -------------------------

/// `amount * pct / 100`, floored.
pub fn percent_of(amount: u64, pct: u8) -> Result<u64> {
    let v = (amount as u128)
        .checked_mul(pct as u128)
        .ok_or(ReportGuardError::MathOverflow)?
        / PERCENT_BASE as u128;
    u64::try_from(v).map_err(|_| error!(ReportGuardError::MathOverflow))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewardPools {
    pub reporter: u64,
    pub team: u64,
    pub committee: u64,
    pub staker: u64,
}

impl RewardPools {
    pub fn compute(frozen: u64, pcts: &RewardPercents) -> Result<Self> {
        Ok(Self {
            reporter: percent_of(frozen, pcts.reporter)?,
            team: percent_of(frozen, pcts.team)?,
            committee: percent_of(frozen, pcts.committee)?,
            staker: percent_of(frozen, pcts.staker)?,
        })
    }

    /// Frozen balance minus every pool that has claimants. Pools nobody can
    /// claim (no committee ballots, no stakers) stay with the treasury.
    pub fn remainder(&self, frozen: u64, has_voters: bool, has_stakers: bool) -> Result<u64> {
        let mut spent = self
            .reporter
            .checked_add(self.team)
            .ok_or(ReportGuardError::MathOverflow)?;
        if has_voters {
            spent = spent
                .checked_add(self.committee)
                .ok_or(ReportGuardError::MathOverflow)?;
        }
        if has_stakers {
            spent = spent
                .checked_add(self.staker)
                .ok_or(ReportGuardError::MathOverflow)?;
        }
        Ok(frozen
            .checked_sub(spent)
            .ok_or(ReportGuardError::InsufficientFunds)?)
    }
}

pub fn stake_weight(staked_at: i64, until: i64) -> u64 {
    until.saturating_sub(staked_at).max(0) as u64
}

/// Sum of `until - staked_at` over all stakes, from the running count and
/// timestamp sum kept on the report.
pub fn total_stake_weight(count: u32, staked_at_sum: i64, until: i64) -> Result<u64> {
    let total = (count as i128)
        .checked_mul(until as i128)
        .and_then(|v| v.checked_sub(staked_at_sum as i128))
        .ok_or(ReportGuardError::MathOverflow)?;
    u64::try_from(total.max(0)).map_err(|_| error!(ReportGuardError::MathOverflow))
}

/// `pool * weight / total`, floored. With zero total weight (everyone staked at
/// the resolution timestamp) the pool is split evenly.
pub fn weighted_share(pool: u64, weight: u64, total: u64, count: u32) -> Result<u64> {
    if count == 0 {
        return Ok(0);
    }
    if total == 0 {
        return Ok(pool / count as u64);
    }
    let v = (pool as u128)
        .checked_mul(weight as u128)
        .ok_or(ReportGuardError::MathOverflow)?
        / total as u128;
    u64::try_from(v).map_err(|_| error!(ReportGuardError::MathOverflow))
}

// -------------------------
// Report targets
// -------------------------

/// Rejects addresses that may never be flagged: the zero address, protocol
/// accounts, the reporter itself and exempted addresses.
pub fn validate_report_target(
    target: &Pubkey,
    reporter: &Pubkey,
    protocol_accounts: &[Pubkey],
    exempt: bool,
) -> Result<()> {
    require!(*target != Pubkey::default(), ReportGuardError::InvalidTarget);
    require!(!protocol_accounts.contains(target), ReportGuardError::InvalidTarget);
    require!(target != reporter, ReportGuardError::SelfReport);
    require!(!exempt, ReportGuardError::ExemptTarget);
    Ok(())
}

/// Reads an optional, seeds-checked Exemption PDA. Missing account means not exempt.
pub fn read_exemption(info: &AccountInfo, program_id: &Pubkey) -> Result<bool> {
    if info.data_is_empty() || info.owner != program_id {
        return Ok(false);
    }
    let data = info.try_borrow_data()?;
    let mut slice: &[u8] = &data[..];
    let exemption = Exemption::try_deserialize(&mut slice)?;
    Ok(exemption.exempt)
}

/// Reads an optional, seeds-checked FlagRecord PDA. Missing account means not flagged.
pub fn read_flag_blocks(info: &AccountInfo, program_id: &Pubkey, now: i64) -> Result<bool> {
    if info.data_is_empty() || info.owner != program_id {
        return Ok(false);
    }
    let data = info.try_borrow_data()?;
    let mut slice: &[u8] = &data[..];
    let flag = FlagRecord::try_deserialize(&mut slice)?;
    Ok(flag.blocks_transfers(now))
}

// -------------------------
// Token CPIs
// -------------------------

/// SPL transfer out of a PDA-owned token account. Zero amounts are skipped.
pub fn transfer_signed<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: from.to_account_info(),
                to: to.to_account_info(),
                authority,
            },
            signer_seeds,
        ),
        amount,
    )
}

/// SPL transfer signed by a wallet.
pub fn transfer_from_user<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    authority: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token::transfer(
        CpiContext::new(
            token_program.to_account_info(),
            Transfer {
                from: from.to_account_info(),
                to: to.to_account_info(),
                authority: authority.to_account_info(),
            },
        ),
        amount,
    )
}

// Asset side: SPL Token or Token-2022 mints. The config PDA is the mint's
// freeze authority and, for seizure, its permanent delegate.

/// Freezes `account` using the config PDA as freeze authority.
/// Accounts already frozen by an earlier report are left as they are.
pub fn freeze_token_account<'info>(
    token_program: &Interface<'info, TokenInterface>,
    account: &InterfaceAccount<'info, AssetAccount>,
    mint: &InterfaceAccount<'info, AssetMint>,
    freeze_authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    if account.is_frozen() {
        return Ok(());
    }
    freeze_signed(token_program, account, mint, freeze_authority, signer_seeds)
}

pub fn thaw_token_account<'info>(
    token_program: &Interface<'info, TokenInterface>,
    account: &InterfaceAccount<'info, AssetAccount>,
    mint: &InterfaceAccount<'info, AssetMint>,
    freeze_authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    if !account.is_frozen() {
        return Ok(());
    }
    token_interface::thaw_account(CpiContext::new_with_signer(
        token_program.to_account_info(),
        ThawAccount {
            account: account.to_account_info(),
            mint: mint.to_account_info(),
            authority: freeze_authority,
        },
        signer_seeds,
    ))
}

fn freeze_signed<'info>(
    token_program: &Interface<'info, TokenInterface>,
    account: &InterfaceAccount<'info, AssetAccount>,
    mint: &InterfaceAccount<'info, AssetMint>,
    freeze_authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    token_interface::freeze_account(CpiContext::new_with_signer(
        token_program.to_account_info(),
        FreezeAccount {
            account: account.to_account_info(),
            mint: mint.to_account_info(),
            authority: freeze_authority,
        },
        signer_seeds,
    ))
}

/// `transfer_checked` of the asset, signed by a PDA (report vault owner or the
/// config PDA acting as permanent delegate). Zero amounts are skipped.
pub fn transfer_asset_signed<'info>(
    token_program: &Interface<'info, TokenInterface>,
    from: &InterfaceAccount<'info, AssetAccount>,
    mint: &InterfaceAccount<'info, AssetMint>,
    to: &InterfaceAccount<'info, AssetAccount>,
    authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            TransferChecked {
                from: from.to_account_info(),
                mint: mint.to_account_info(),
                to: to.to_account_info(),
                authority,
            },
            signer_seeds,
        ),
        amount,
        mint.decimals,
    )
}

/// Moves the whole balance of a confirmed account into `vault`: thaw, transfer
/// as permanent delegate, freeze again. Returns the amount moved.
pub fn seize_frozen_balance<'info>(
    token_program: &Interface<'info, TokenInterface>,
    account: &InterfaceAccount<'info, AssetAccount>,
    mint: &InterfaceAccount<'info, AssetMint>,
    vault: &InterfaceAccount<'info, AssetAccount>,
    config: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
) -> Result<u64> {
    let amount = account.amount;
    thaw_token_account(token_program, account, mint, config.clone(), signer_seeds)?;
    transfer_asset_signed(
        token_program,
        account,
        mint,
        vault,
        config.clone(),
        signer_seeds,
        amount,
    )?;
    // `account` still holds the pre-thaw snapshot, so freeze unconditionally.
    freeze_signed(token_program, account, mint, config, signer_seeds)?;
    Ok(amount)
}
