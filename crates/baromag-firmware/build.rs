//! Links the esp-hal memory layout and bakes optional cadence overrides from
//! `.env` into the binary.

/// Variables forwarded to `option_env!` in `settings.rs`.
const OVERRIDES: [&str; 3] = [
    "BAROMAG_PRESSURE_PERIOD_MS",
    "BAROMAG_MAGNETIC_PERIOD_MS",
    "BAROMAG_BUS_TIMEOUT_MS",
];

fn main() {
    println!("cargo:rustc-link-arg=-Tlinkall.x");
    println!("cargo:rerun-if-changed=.env");

    // A missing .env is fine: every override has a default.
    let _ = dotenvy::dotenv();

    for key in OVERRIDES {
        println!("cargo:rerun-if-env-changed={key}");
        if let Ok(value) = std::env::var(key) {
            println!("cargo:rustc-env={key}={value}");
        }
    }
}
