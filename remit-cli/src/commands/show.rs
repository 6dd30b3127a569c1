//! Show command - display one account or list all of them

use anyhow::Result;
use colored::Colorize;
use remit_core::Account;

use super::get_context;
use crate::output;

pub fn run(id: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let accounts = match id {
        Some(id) => vec![ctx.account_service.get(id)?],
        None => ctx.account_service.list()?,
    };

    if json {
        match id {
            Some(_) => println!("{}", serde_json::to_string_pretty(&accounts[0])?),
            None => println!("{}", serde_json::to_string_pretty(&accounts)?),
        }
        return Ok(());
    }

    if accounts.is_empty() {
        output::info("No accounts yet. Create one with 'remit open <id> <balance>'.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Account", "Balance"]);
    for account in &accounts {
        table.add_row(vec![account.id.clone(), output::format_amount(account.balance)]);
    }
    println!("{}", table);

    if id.is_none() {
        println!("{} {}", "Total:".bold(), output::format_amount(total_balance(&accounts)));
    }
    Ok(())
}

/// Sum of all balances, wide enough that `i64` balances cannot overflow it
fn total_balance(accounts: &[Account]) -> i128 {
    accounts.iter().map(|a| i128::from(a.balance)).sum()
}
