use crate::{
    cli::SessionOptions,
    error::{CliError, Result},
    session,
};

pub fn run(options: &SessionOptions) -> Result<()> {
    let mut session = session::open(options)?;
    if session.provider().is_none() {
        return Err(CliError::NoProvider);
    }

    session.refresh_minted_count();
    println!("{}", session.view().counter);
    Ok(())
}
