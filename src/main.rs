//! Binary entry point of the info server.

#![allow(unused_crate_dependencies)]

use std::process;

use webserver::{Responder, Server, ServerConfig};

fn main() {
    env_logger::init();

    let config = ServerConfig::default();

    let server = match Server::new(&config) {
        Ok(server) => server,
        Err(err) => {
            log::error!("binding [{}] failed [{}]", config.addr, err);
            eprintln!("Error starting server: {err}");
            process::exit(1);
        }
    };

    let addr = server.server_addr();
    println!("Server running at http://localhost:{}/", addr.port());
    println!("API endpoint available at http://localhost:{}/api", addr.port());
    println!("Press Ctrl+C to stop the server");

    let responder = Responder::new(addr.port());

    for request in server.incoming_requests() {
        if let Err(err) = responder.handle(request) {
            log::error!("failed to answer request [{}]", err);
        }
    }
}
