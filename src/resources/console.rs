//! Bridge between the stdin console thread and the ECS world.
//!
//! Use [`setup_console`] once during initialization. The reader thread forwards
//! every non-empty line it reads; the
//! [`console_system`](crate::systems::scripting::console_system) drains them on
//! the main thread, where the Lua state lives.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, info};
use std::io::{BufRead, Write};

/// Receiving end of the console line channel.
#[derive(Resource)]
pub struct ConsoleBridge {
    pub rx_line: Receiver<String>,
}

impl ConsoleBridge {
    /// Take every line received since the last call, in arrival order.
    pub fn drain(&self) -> Vec<String> {
        self.rx_line.try_iter().collect()
    }
}

/// Spawn the stdin reader thread and insert [`ConsoleBridge`].
///
/// The thread is detached: it ends on EOF or once the bridge is dropped.
pub fn setup_console(world: &mut World) {
    let (tx_line, rx_line) = unbounded::<String>();

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        console_reader(stdin.lock(), tx_line, true);
    });

    info!("Lua console started on stdin");
    world.insert_resource(ConsoleBridge { rx_line });
}

/// Read lines from `reader` and send the non-blank ones over `tx`.
///
/// With `prompt` set, `>> ` is printed before each read.
pub fn console_reader<R: BufRead>(reader: R, tx: Sender<String>, prompt: bool) {
    let mut lines = reader.lines();
    loop {
        if prompt {
            print!(">> ");
            let _ = std::io::stdout().flush();
        }
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                debug!("Console read failed: {}", e);
                break;
            }
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }
        if tx.send(line).is_err() {
            break;
        }
    }
    debug!("Console reader finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reader_forwards_lines_until_eof() {
        let (tx, rx) = unbounded();
        let input = Cursor::new("print('a')\n\n   \nengine.log('b')\n");
        console_reader(input, tx, false);

        let bridge = ConsoleBridge { rx_line: rx };
        assert_eq!(
            bridge.drain(),
            vec!["print('a')".to_string(), "engine.log('b')".to_string()]
        );
        assert!(bridge.drain().is_empty());
    }

    #[test]
    fn test_reader_stops_when_bridge_is_gone() {
        let (tx, rx) = unbounded();
        drop(rx);
        console_reader(Cursor::new("a\nb\nc\n"), tx, false);
    }
}
