use crate::{cli::SessionOptions, error::Result, session, ui};

pub fn run(options: &SessionOptions) -> Result<()> {
    let mut session = session::open(options)?;
    if session.provider().is_none() {
        ui::warn("No wallet provider configured, showing the disconnected page");
    }
    session.init();

    ui::print_view(&session.view());
    Ok(())
}
