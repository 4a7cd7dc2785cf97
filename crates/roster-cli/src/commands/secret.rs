//! `roster secret generate`

use roster_auth::SigningSecret;

pub fn generate() {
    let secret = SigningSecret::generate_encoded();

    println!("{secret}");
    eprintln!();
    eprintln!("⚠️  Keep this secret out of version control.");
    eprintln!("Set it for the server with:");
    eprintln!("  export ROSTER_JWT_SECRET={secret}");
}
