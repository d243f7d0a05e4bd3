pub mod jwt_auth;
pub mod redirect_gate;
