use anchor_lang::prelude::*;

use crate::errors::TeamBetErrorCode;
use crate::events::BanListUpdated;
use crate::state::*;

#[derive(Accounts)]
pub struct UpdateBanList<'info> {
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
        has_one = authority @ TeamBetErrorCode::Unauthorized
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [BannedList::SEED],
        bump = banned_list.bump
    )]
    pub banned_list: Box<Account<'info, BannedList>>,

    pub authority: Signer<'info>,
}

pub fn update_ban_list_handler(
    ctx: Context<UpdateBanList>,
    add: Vec<Pubkey>,
    remove: Vec<Pubkey>,
) -> Result<()> {
    let banned = &mut ctx.accounts.banned_list;
    banned.apply(&add, &remove)?;

    emit!(BanListUpdated {
        added: add.len() as u16,
        removed: remove.len() as u16,
        total: banned.entries.len() as u16,
    });

    Ok(())
}
