//! Worker-mode entry point: a request/reply loop over stdin/stdout.
//!
//! The supervisor writes one JSON request per line and blocks on the reply
//! line. Errors are reported in-band so a bad request never kills the
//! process; the loop ends when the supervisor closes the pipe.

use std::io::{BufRead, Write};

use crate::bridge::{dispatch, BridgeReply, BridgeRequest, TailwindVersion};
use crate::bridge::engine::{V3Engine, V4Engine, VersionEngine};
use crate::errors::Result;

pub fn serve(version: TailwindVersion) -> Result<()> {
    let engine: Box<dyn VersionEngine> = match version {
        TailwindVersion::V3 => Box::new(V3Engine::new()),
        TailwindVersion::V4 => Box::new(V4Engine::new()),
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let reply: BridgeReply = match serde_json::from_str::<BridgeRequest>(&line) {
            Ok(req) => dispatch(engine.as_ref(), &req).map_err(|e| e.to_string()),
            Err(e) => Err(format!("malformed request: {e}")),
        };
        serde_json::to_writer(&mut out, &reply)?;
        out.write_all(b"\n")?;
        out.flush()?;
    }

    Ok(())
}
