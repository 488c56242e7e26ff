//! Basic console logging example.
//!
//! Two components log side by side, each with its own prefix and verbosity.

use prefixlog::Logger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let server = Logger::new("server", 2)?;
    let db = Logger::new("db", 0)?;

    server.trace(&[&"Something very low level."]);
    server.debug(&[&"Useful debugging information."]);
    server.infof(format_args!("Listening on port {}", 8080));

    db.debug(&[&"Not shown: db logs at the default verbosity."]);
    db.warn(&[&"You should probably take a look at this."]);
    db.errorln(&[&"Something failed but I'm not quitting."]);

    // Exits with status 1 after logging.
    server.fatal(&[&"Bye."]);
}
