// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::Parser;

use crate::{Args, MAX_SESSION_HOURS};

fn parse(args: &[&str]) -> Result<Args, clap::Error> {
    Args::try_parse_from(std::iter::once("earthen-server").chain(args.iter().copied()))
}

#[test]
fn test_session_hours_default() {
    let args: Args = parse(&[]).unwrap();
    assert_eq!(args.session_hours, 8);
}

#[test]
fn test_session_hours_within_range() {
    assert_eq!(parse(&["--session-hours", "1"]).unwrap().session_hours, 1);
    assert_eq!(
        parse(&["--session-hours", "8760"]).unwrap().session_hours,
        MAX_SESSION_HOURS
    );
}

#[test]
fn test_session_hours_out_of_range_is_rejected() {
    assert!(parse(&["--session-hours", "0"]).is_err());
    assert!(parse(&["--session-hours", "-4"]).is_err());
    assert!(parse(&["--session-hours", "100000000"]).is_err());
}
