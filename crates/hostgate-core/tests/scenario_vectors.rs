//! Store scenario vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]


#[test]
fn scenario_vectors() {
    let files = [
        "end_to_end.json",
        "ban_overrides_friend.json",
        "open_host.json",
        "relationship_errors.json",
        "filter_welcomes.json",
    ];

    for f in files {
        let sc = vector_loader::load(f);
        vector_loader::run(&sc);
    }
}
