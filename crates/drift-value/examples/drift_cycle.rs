//! Walk one remotely managed resource through three reconciliation cycles

use drift_core::reconcile_surface;
use drift_value::StructuredCodec;
use serde_json::json;

fn main() -> drift_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let codec = StructuredCodec::new();

    // Cycle 1: steady state. The consumer manages two of the four settings
    // the remote reports; the certificate is still being provisioned, so the
    // remote returns the "not yet determined" placeholder for it.
    let live = json!({
        "min_tls_version": "1.2",
        "ipv6": true,
        "retention_days": 30,
        "certificate": {"$unknown": true}
    });
    let baseline = live.clone();
    let managed = json!({
        "min_tls_version": "1.2",
        "ipv6": true
    });

    let pass = reconcile_surface(&codec, Some(&live), Some(&baseline), Some(&managed));
    pass.diagnostics.into_result()?;
    println!("cycle 1: {} drift entries", pass.drift.len());

    // Cycle 2: retention was raised in the remote console and the
    // certificate finished provisioning. Only the retention change counts
    // as drift: a placeholder resolving to its first concrete value never
    // does. The drifted key is promoted into the managed set.
    let live = json!({
        "min_tls_version": "1.2",
        "ipv6": true,
        "retention_days": 90,
        "certificate": "saas-cert-4411"
    });

    let pass = reconcile_surface(
        &codec,
        Some(&live),
        pass.new_baseline.as_ref(),
        pass.new_managed.as_ref(),
    );
    pass.diagnostics.into_result()?;
    for entry in &pass.drift {
        println!("cycle 2: `{}` changed externally (promoted: {})", entry.key, entry.promoted);
    }
    if let Some(updated) = &pass.new_managed {
        println!("cycle 2: managed set is now {:#}", updated);
    }

    // Cycle 3: nothing changed remotely. Reconciling the persisted outputs
    // against the same live snapshot converges: no drift, no growth.
    let pass = reconcile_surface(
        &codec,
        Some(&live),
        pass.new_baseline.as_ref(),
        pass.new_managed.as_ref(),
    );
    pass.diagnostics.into_result()?;
    println!("cycle 3: {} drift entries", pass.drift.len());
    if let Some(refreshed) = &pass.new_baseline {
        println!("cycle 3: baseline settled at {:#}", refreshed);
    }

    Ok(())
}
