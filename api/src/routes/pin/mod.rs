//! Pin verification route handlers
//!
//! - `POST /receiving-email` issues a pin to an address
//! - `POST /receiving-pin` checks a pin supplied by the user
//! - `POST /resending-pin` sends a fresh pin once the cooldown is over

use actix_web::web;

pub mod issue;
pub mod resend;
pub mod verify;

pub use issue::receive_email;
pub use resend::resend_pin;
pub use verify::receive_pin;

/// Register the pin routes on a scope or app
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/receiving-email", web::post().to(receive_email))
        .route("/receiving-pin", web::post().to(receive_pin))
        .route("/resending-pin", web::post().to(resend_pin));
}
