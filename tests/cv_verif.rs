use moscap_cv::models::moscap::cv::CvSweepEngine;
use moscap_cv::{
    compute_cv, compute_cv_family, CvConfig, Polarity, SweptParameter, VoltageSweep,
};

fn standard_config(polarity: Polarity) -> CvConfig {
    CvConfig::new(
        polarity,
        3e-9,
        97e-9,
        1e21,
        VoltageSweep::new(-0.4, 0.4, 41).unwrap(),
    )
}

#[test]
fn end_to_end_nmos_curve() {
    let config = standard_config(Polarity::Nmos);
    let curve = compute_cv(&config).unwrap();

    assert_eq!(curve.len(), 41);
    assert!(curve.all_converged());

    let voltages = curve.gate_voltages();
    assert!(voltages.windows(2).all(|w| w[1] > w[0]));

    // Depletion dip: a strict interior local minimum between accumulation
    // and inversion, sitting near zero bias for this symmetric sweep.
    let c = curve.capacitances();
    let dip = (1..40)
        .find(|&i| c[i] < c[i - 1] && c[i] < c[i + 1])
        .expect("no interior local minimum found");
    assert!(voltages[dip].abs() < 0.1);
    assert!(c[dip] < c[0] / 10.0);
}

#[test]
fn accumulation_end_is_largest_and_bounded_by_cox() {
    let config = standard_config(Polarity::Nmos);
    let device = config.device().unwrap();
    let cox_uf_cm2 = device.oxide_capacitance() * 100.0;

    let curve = compute_cv(&config).unwrap();
    let c = curve.capacitances();

    // For a p-substrate the accumulation end is the negative-Vg end of the
    // sweep; its capacitance tops the curve and can never exceed the oxide
    // capacitance the semiconductor sits in series with.
    let c_acc = c[0];
    assert!(c_acc > 0.0);
    assert!(c.iter().all(|&v| v <= c_acc + 1e-12));
    assert!(c_acc < cox_uf_cm2);

    // Calibrated magnitude for this configuration.
    assert!(c_acc > 0.030 && c_acc < 0.045, "c_acc = {c_acc}");
}

#[test]
fn pmos_curve_mirrors_nmos() {
    let nmos = compute_cv(&standard_config(Polarity::Nmos)).unwrap();
    let pmos = compute_cv(&standard_config(Polarity::Pmos)).unwrap();

    // Flipping the doping sign mirrors the electrostatics in Vg, so the
    // pMOS capacitance at +Vg matches the nMOS capacitance at -Vg.
    let cn = nmos.capacitances();
    let cp = pmos.capacitances();
    for i in 0..41 {
        assert!(
            (cp[i] - cn[40 - i]).abs() < 1e-3,
            "mirror mismatch at index {i}: {} vs {}",
            cp[i],
            cn[40 - i]
        );
    }
}

#[test]
fn warm_start_uses_no_more_iterations_than_cold_start() {
    let config = standard_config(Polarity::Nmos);
    let device = config.device().unwrap();

    let warm = CvSweepEngine::new(&device, config.solver())
        .run(&config.sweep)
        .unwrap();

    let mut cold_engine = CvSweepEngine::new(&device, config.solver());
    cold_engine.warm_start = false;
    let cold = cold_engine.run(&config.sweep).unwrap();

    assert!(warm.total_iterations() <= cold.total_iterations());
    // Continuation must not change where the curve converges to.
    let cw = warm.capacitances();
    let cc = cold.capacitances();
    for i in 0..41 {
        assert!((cw[i] - cc[i]).abs() < 1e-3);
    }
}

#[test]
fn halving_oxide_capacitance_halves_accumulation_capacitance() {
    let sweep = VoltageSweep::new(-0.4, 0.4, 41).unwrap();
    let thin = compute_cv(&CvConfig::new(Polarity::Nmos, 2e-9, 97e-9, 1e21, sweep)).unwrap();
    let thick = compute_cv(&CvConfig::new(Polarity::Nmos, 4e-9, 97e-9, 1e21, sweep)).unwrap();

    let ratio = thin.capacitances()[0] / thick.capacitances()[0];
    assert!(
        (1.8..2.2).contains(&ratio),
        "accumulation capacitance ratio = {ratio}"
    );
}

#[test]
fn doping_family_orders_accumulation_capacitance() {
    let base = standard_config(Polarity::Nmos);
    let family =
        compute_cv_family(&base, &SweptParameter::Doping(vec![1e20, 1e21, 1e22])).unwrap();

    assert_eq!(family.len(), 3);
    let acc: Vec<f64> = family
        .iter()
        .map(|entry| entry.curve.capacitances()[0])
        .collect();
    // Heavier substrate doping accumulates more charge per volt.
    assert!(acc[0] < acc[1] && acc[1] < acc[2], "acc = {acc:?}");
}
