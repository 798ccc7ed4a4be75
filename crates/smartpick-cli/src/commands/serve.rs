use std::io::{BufRead, Write};
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use smartpick_lib::output::ConsoleIO;
use smartpick_lib::runtime::Runtime;

use crate::server;

/// Run the `smartpick serve` command. Blocks until Ctrl-C.
pub fn run_serve<IN, OUT, ERR>(
    bind: SocketAddr,
    runtime: Runtime,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: BufRead,
    OUT: Write,
    ERR: Write,
{
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    rt.block_on(async {
        let listener = tokio::net::TcpListener::bind(bind)
            .await
            .with_context(|| format!("Failed to bind {bind}"))?;
        let addr = listener.local_addr()?;
        writeln!(io.stdout(), "Serving recommendations on http://{addr}")?;
        io.stdout().flush()?;
        server::serve(listener, Arc::new(runtime)).await
    })
}
