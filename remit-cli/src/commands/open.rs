//! Open command - create an account

use anyhow::Result;

use super::get_context;
use crate::output;

pub fn run(id: &str, balance: i64) -> Result<()> {
    let ctx = get_context()?;
    let account = ctx.account_service.open(id, balance)?;

    output::success(&format!(
        "Opened account '{}' with balance {}",
        account.id,
        output::format_amount(account.balance)
    ));
    Ok(())
}
