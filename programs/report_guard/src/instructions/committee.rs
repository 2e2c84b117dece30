use anchor_lang::prelude::*;

use crate::errors::ReportGuardError;
use crate::{InitializeCommittee, ManageCommittee, INITIAL_VERSION};

pub fn initialize_committee(
    ctx: Context<InitializeCommittee>,
    quorum: u8,
    initial_members: Vec<Pubkey>,
) -> Result<()> {
    let admin = ctx.accounts.config.admin;
    require_keys_eq!(admin, ctx.accounts.admin.key(), ReportGuardError::Unauthorized);

    let committee = &mut ctx.accounts.committee;
    committee.admin = admin;
    committee.bump = ctx.bumps.committee;
    committee.version = INITIAL_VERSION;
    committee.seat(initial_members, quorum)?;

    msg!(
        "committee seated: {} members, quorum {}",
        committee.members.len(),
        committee.quorum
    );
    Ok(())
}

pub fn add_committee_member(ctx: Context<ManageCommittee>, member: Pubkey) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.config.admin,
        ctx.accounts.admin.key(),
        ReportGuardError::Unauthorized
    );
    let committee = &mut ctx.accounts.committee;
    committee.add_member(member)?;

    msg!("committee member added: {} ({} seats)", member, committee.members.len());
    Ok(())
}

/// Open reports keep their quorum snapshot; votes on them use the lower of
/// that snapshot and the seats left after this removal.
pub fn remove_committee_member(ctx: Context<ManageCommittee>, member: Pubkey) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.config.admin,
        ctx.accounts.admin.key(),
        ReportGuardError::Unauthorized
    );
    let committee = &mut ctx.accounts.committee;
    committee.remove_member(member)?;

    msg!(
        "committee member removed: {} ({} seats, quorum {})",
        member,
        committee.members.len(),
        committee.quorum
    );
    Ok(())
}

pub fn set_committee_quorum(ctx: Context<ManageCommittee>, quorum: u8) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.config.admin,
        ctx.accounts.admin.key(),
        ReportGuardError::Unauthorized
    );
    ctx.accounts.committee.set_quorum(quorum)?;
    msg!("committee quorum set to {}", quorum);
    Ok(())
}
