use std::thread;

use crate::{
    cli::{SessionOptions, WatchArgs},
    error::{CliError, Result},
    session, ui,
};

pub fn run(options: &SessionOptions, args: WatchArgs) -> Result<()> {
    let mut session = session::open(options)?;
    session.init();

    if session.state().current_account.is_none() {
        return Err(CliError::NotConnected);
    }
    if session.subscription_count() == 0 {
        return Err(CliError::Message(
            "event listener could not be set up, see the log for details".to_string(),
        ));
    }

    ui::status("Waiting for mint notifications (Ctrl-C to stop)");
    let interval = session.config().poll_interval();
    let mut received = 0;

    loop {
        received += session.poll_events().len();
        if args.max_events.is_some_and(|max| received >= max) {
            break;
        }
        thread::sleep(interval);
    }

    ui::success(format!("{received} notification(s) received"));
    Ok(())
}
