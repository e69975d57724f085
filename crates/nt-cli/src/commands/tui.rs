use anyhow::Result;

use crate::context::Context;
use crate::tui;

pub fn handle(ctx: &mut Context) -> Result<()> {
    let display = ctx.config().display.clone();
    tui::run(&mut ctx.store, &display)
}
