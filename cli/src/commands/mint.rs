use crate::{
    cli::SessionOptions,
    error::{CliError, Result},
    session, ui,
};

pub fn run(options: &SessionOptions) -> Result<()> {
    let mut session = session::open(options)?;
    session.init();

    if session.state().current_account.is_none() {
        ui::print_view(&session.view());
        return Err(CliError::NotConnected);
    }

    ui::status("Minting, confirm the transaction in your wallet");
    let outcome = session.mint();
    session.poll_events();
    ui::print_view(&session.view());

    let receipt = outcome?;
    ui::success(format!(
        "Mined, see transaction: {}",
        session.config().transaction_link(receipt.transaction_hash)
    ));
    Ok(())
}
