use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Build date (UTC RFC 3339); falls back to unix:<secs> if formatting fails.
    let now = OffsetDateTime::now_utc();
    let build_date = now
        .format(&Rfc3339)
        .unwrap_or_else(|_| format!("unix:{}", now.unix_timestamp()));
    println!("cargo:rustc-env=SETUP_APP_BUILD_DATE={build_date}");

    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=SETUP_APP_BUILD_TARGET={target}");

    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=SETUP_APP_BUILD_PROFILE={profile}");

    let rustc_ver = rustc_version::version()
        .map(|v| format!("rustc {v}"))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=SETUP_APP_BUILD_RUSTC={rustc_ver}");
}
