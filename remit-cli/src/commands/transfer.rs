//! Transfer command - move money between two accounts

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::get_context;
use crate::output;

#[derive(Serialize)]
struct TransferOutcome<'a> {
    from: &'a str,
    to: &'a str,
    amount: i64,
    from_balance: i64,
    to_balance: i64,
}

pub fn run(from: &str, to: &str, amount: i64, json: bool) -> Result<()> {
    let ctx = get_context()?;
    ctx.transfer_service.account_transfer(from, to, amount)?;

    let from_balance = ctx.account_service.get(from)?.balance;
    let to_balance = ctx.account_service.get(to)?.balance;

    if json {
        let outcome = TransferOutcome {
            from,
            to,
            amount,
            from_balance,
            to_balance,
        };
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "\n{} Transferred {} from '{}' to '{}'\n",
        "✓".green(),
        output::format_amount(amount),
        from,
        to
    );
    let mut table = output::create_table();
    table.set_header(vec!["Account", "Balance"]);
    table.add_row(vec![from.to_string(), output::format_amount(from_balance)]);
    table.add_row(vec![to.to_string(), output::format_amount(to_balance)]);
    println!("{}", table);
    Ok(())
}
