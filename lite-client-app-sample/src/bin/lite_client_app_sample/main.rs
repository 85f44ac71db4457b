//! Main entry point for LiteClientAppSample

#![deny(warnings, missing_docs, trivial_casts, unused_qualifications)]
#![forbid(unsafe_code)]

use lite_client_app_sample::application::APP;

/// Boot LiteClientAppSample
fn main() {
    abscissa_core::boot(&APP);
}
