use crate::{cli::SessionOptions, error::Result, session, ui};

pub fn run(options: &SessionOptions) -> Result<()> {
    let mut session = session::open(options)?;
    session.init();

    if let Some(account) = session.state().current_account {
        ui::success(format!("Already connected as {account}"));
        ui::print_view(&session.view());
        return Ok(());
    }

    let connected = session.connect();
    ui::print_view(&session.view());

    let account = connected?;
    ui::success(format!("Connected as {account}"));
    Ok(())
}
