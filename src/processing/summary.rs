use crate::models::moscap::cv::CvCurve;
use crate::models::moscap::moscap::MoscapDevice;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Human-readable report for one C-V run: device figures plus per-curve
/// convergence statistics.
pub struct SweepSummary {
    // Mesh info
    pub num_nodes: usize,
    pub spacing: f64,
    pub oxide_nodes: usize,
    pub semiconductor_nodes: usize,
    pub stack_length: f64,

    // Physics info
    pub thermal_voltage: f64,
    pub oxide_capacitance_uf_cm2: f64,
    pub doping_magnitude: f64,

    // Per-curve results
    curves: Vec<CurveStats>,
}

struct CurveStats {
    label: String,
    num_points: usize,
    converged_points: usize,
    total_iterations: u32,
    c_min: f64,
    c_max: f64,
}

impl SweepSummary {
    pub fn from_device(device: &MoscapDevice) -> Self {
        let first_si = device.mesh.first_semiconductor_node();
        Self {
            num_nodes: device.mesh.num_nodes(),
            spacing: device.mesh.spacing,
            oxide_nodes: first_si,
            semiconductor_nodes: device.mesh.num_nodes() - first_si,
            stack_length: device.mesh.length(),
            thermal_voltage: device.params.thermal_voltage(),
            oxide_capacitance_uf_cm2: device.oxide_capacitance() * 100.0,
            doping_magnitude: device
                .doping
                .as_slice()
                .iter()
                .fold(0.0, |acc: f64, d| acc.max(d.abs())),
            curves: Vec::new(),
        }
    }

    pub fn add_curve(&mut self, label: &str, curve: &CvCurve) {
        let capacitances = curve.capacitances();
        self.curves.push(CurveStats {
            label: label.to_string(),
            num_points: curve.len(),
            converged_points: curve.points.iter().filter(|p| p.converged).count(),
            total_iterations: curve.total_iterations(),
            c_min: capacitances.iter().cloned().fold(f64::INFINITY, f64::min),
            c_max: capacitances
                .iter()
                .cloned()
                .fold(f64::NEG_INFINITY, f64::max),
        });
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut file = File::create(path)?;

        writeln!(file, "{}", "=".repeat(60))?;
        writeln!(file, "MOSCAP C-V SWEEP SUMMARY")?;
        writeln!(file, "{}", "=".repeat(60))?;
        writeln!(file)?;

        writeln!(file, "MESH")?;
        writeln!(file, "{}", "-".repeat(60))?;
        writeln!(file, "Nodes:               {}", self.num_nodes)?;
        writeln!(
            file,
            "  oxide / semi:      {} / {}",
            self.oxide_nodes, self.semiconductor_nodes
        )?;
        writeln!(file, "Spacing:             {:.6e} m", self.spacing)?;
        writeln!(file, "Stack length:        {:.6e} m", self.stack_length)?;
        writeln!(file)?;

        writeln!(file, "PHYSICS")?;
        writeln!(file, "{}", "-".repeat(60))?;
        writeln!(file, "Thermal voltage:     {:.4} V", self.thermal_voltage)?;
        writeln!(
            file,
            "Oxide capacitance:   {:.4} uF/cm^2",
            self.oxide_capacitance_uf_cm2
        )?;
        writeln!(
            file,
            "Doping magnitude:    {:.2e} m^-3",
            self.doping_magnitude
        )?;
        writeln!(file)?;

        if !self.curves.is_empty() {
            writeln!(file, "CURVES")?;
            writeln!(file, "{}", "-".repeat(60))?;
            for stats in &self.curves {
                writeln!(file, "{}:", stats.label)?;
                writeln!(
                    file,
                    "  Points:            {} ({} converged)",
                    stats.num_points, stats.converged_points
                )?;
                writeln!(file, "  Total iterations:  {}", stats.total_iterations)?;
                writeln!(
                    file,
                    "  C range:           {:.4e} .. {:.4e} uF/cm^2",
                    stats.c_min, stats.c_max
                )?;
            }
            writeln!(file)?;
        }

        writeln!(file, "{}", "=".repeat(60))?;
        Ok(())
    }

    pub fn print_to_console(&self) {
        println!("\n{}", "=".repeat(60));
        println!("MOSCAP C-V SWEEP SUMMARY");
        println!("{}", "=".repeat(60));
        println!(
            "Mesh:          {} nodes ({} oxide, {} semi)",
            self.num_nodes, self.oxide_nodes, self.semiconductor_nodes
        );
        println!(
            "Cox:           {:.4} uF/cm^2",
            self.oxide_capacitance_uf_cm2
        );
        for stats in &self.curves {
            println!(
                "{:<12} {} pts, {} converged, {} iters",
                format!("{}:", stats.label),
                stats.num_points,
                stats.converged_points,
                stats.total_iterations
            );
        }
        println!("{}\n", "=".repeat(60));
    }
}
