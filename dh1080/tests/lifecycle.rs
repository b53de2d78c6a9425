//! Process-wide init/deinit lifecycle.
//!
//! Lives in its own test binary because it tears down the global store,
//! which would pull the rug out from under any test running alongside it.

use dh1080::Dh1080Error;

#[test]
fn test_global_lifecycle() {
    // Before init every operation fails cleanly.
    assert!(!dh1080::global_store().is_initialized());
    assert!(matches!(
        dh1080::generate_keypair(),
        Err(Dh1080Error::NotInitialized)
    ));
    assert!(matches!(
        dh1080::compute_shared_key("AAAA", "AAAA"),
        Err(Dh1080Error::NotInitialized)
    ));
    assert!(!dh1080::is_valid_public_key("Ag"));

    // Deinit without init is a no-op.
    dh1080::deinit();

    dh1080::init().unwrap();
    assert!(dh1080::is_valid_public_key("Ag"));
    let before = dh1080::generate_keypair().unwrap();

    // Second init is refused, first stays usable.
    assert!(matches!(dh1080::init(), Err(Dh1080Error::AlreadyInitialized)));
    let after = dh1080::generate_keypair().unwrap();
    assert_eq!(
        dh1080::compute_shared_key(before.private_wire(), after.public_wire()).unwrap(),
        dh1080::compute_shared_key(after.private_wire(), before.public_wire()).unwrap()
    );

    // A session started before deinit still completes afterwards.
    let mut session = dh1080::start_exchange(dh1080::Role::Initiator).unwrap();
    dh1080::deinit();
    assert!(!dh1080::global_store().is_initialized());
    assert!(session.complete(after.public_wire()).is_ok());

    assert!(matches!(
        dh1080::start_exchange(dh1080::Role::Responder),
        Err(Dh1080Error::NotInitialized)
    ));

    // And the cycle can start over.
    dh1080::init().unwrap();
    assert!(dh1080::generate_keypair().is_ok());
    dh1080::deinit();
}
