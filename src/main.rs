use moscap_cv::processing::csv_writer;
use moscap_cv::processing::summary::SweepSummary;
use moscap_cv::{
    compute_cv, compute_cv_family, CvConfig, CvCurve, Polarity, SweptParameter, VoltageSweep,
};
use std::fs;

fn main() {
    fs::create_dir_all("output/moscap").expect("Failed to create output directory");

    let sweep = VoltageSweep::new(-0.4, 0.4, 41).expect("Invalid sweep");
    let base = CvConfig::new(Polarity::Nmos, 3e-9, 97e-9, 1e21, sweep);

    // nMOS / pMOS pair on the same stack.
    let nmos = run_curve(&base, Polarity::Nmos);
    let pmos = run_curve(&base, Polarity::Pmos);

    let device = base.device().expect("Invalid device configuration");
    let mut summary = SweepSummary::from_device(&device);
    summary.add_curve("nmos", &nmos);
    summary.add_curve("pmos", &pmos);

    csv_writer::write_columns(
        "output/moscap/cv_nmos_pmos.csv",
        &["vg", "c_nmos_uf_cm2", "c_pmos_uf_cm2"],
        &[nmos.gate_voltages(), nmos.capacitances(), pmos.capacitances()],
    )
    .expect("Failed to write nMOS/pMOS curves");
    println!("Curves saved to output/moscap/cv_nmos_pmos.csv");

    // Doping family (nMOS substrate).
    let na_values = vec![1e20, 1e21, 1e22];
    let na_family = compute_cv_family(&base, &SweptParameter::Doping(na_values))
        .expect("Doping family failed");
    for entry in &na_family {
        summary.add_curve(&entry.value.to_string(), &entry.curve);
    }
    csv_writer::write_cv_family("output/moscap/cv_na_sweep.csv", &na_family)
        .expect("Failed to write doping family");
    println!("Doping family saved to output/moscap/cv_na_sweep.csv");

    // Oxide-thickness family.
    let tox_values = vec![2e-9, 3e-9, 4e-9];
    let tox_family = compute_cv_family(&base, &SweptParameter::OxideThickness(tox_values))
        .expect("Oxide-thickness family failed");
    for entry in &tox_family {
        summary.add_curve(&entry.value.to_string(), &entry.curve);
    }
    csv_writer::write_cv_family("output/moscap/cv_tox_sweep.csv", &tox_family)
        .expect("Failed to write oxide-thickness family");
    println!("Oxide-thickness family saved to output/moscap/cv_tox_sweep.csv");

    summary
        .write_to_file("output/moscap/sweep_summary.txt")
        .expect("Failed to write summary");
    summary.print_to_console();
    println!("Summary saved to output/moscap/sweep_summary.txt");
}

fn run_curve(base: &CvConfig, polarity: Polarity) -> CvCurve {
    let mut config = base.clone();
    config.polarity = polarity;

    println!("Running {polarity} C-V sweep...");
    let curve = compute_cv(&config).expect("C-V sweep failed");
    if !curve.all_converged() {
        let stuck = curve.points.iter().filter(|p| !p.converged).count();
        eprintln!("Warning: {stuck} sweep points did not converge");
    }
    curve
}
