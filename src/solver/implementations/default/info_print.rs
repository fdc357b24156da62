use super::*;
use crate::io::{ConfigurablePrintTarget, PrintTarget};
use crate::solver::core::{
    cones::{CompositeCone, Cone, SupportedConeAsTag, SupportedConeTag},
    traits::InfoPrint,
};
use crate::{algebra::*, VERSION};
use std::io::Write;
use std::time::Duration;

impl<T> ConfigurablePrintTarget for DefaultInfo<T> {
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.stream.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}

impl<T> InfoPrint<T> for DefaultInfo<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type C = CompositeCone<T>;
    type SE = DefaultSettings<T>;

    fn print_configuration(
        &mut self,
        settings: &DefaultSettings<T>,
        data: &DefaultProblemData<T>,
        cones: &CompositeCone<T>,
    ) {
        if !settings.verbose {
            return;
        }
        _print_configuration(&mut self.stream, settings, data, cones).ok();
    }

    fn print_status_header(&mut self, settings: &DefaultSettings<T>) {
        if !settings.verbose {
            return;
        }
        let out = &mut self.stream;

        writeln!(
            out,
            "iter     pcost        dcost        pres       dres       gap        scale     time"
        )
        .ok();
        writeln!(
            out,
            "-------------------------------------------------------------------------------------"
        )
        .ok();
        out.flush().ok();
    }

    fn print_status(&mut self, settings: &DefaultSettings<T>) {
        if !settings.verbose {
            return;
        }
        let out = &mut self.stream;

        writeln!(
            out,
            "{:>5}  {:>+10.4e}  {:>+10.4e}  {:>8.2e}  {:>8.2e}  {:>8.2e}  {:>7.1e}  {:>8.2e}s",
            self.iterations,
            self.cost_primal,
            self.cost_dual,
            self.res_primal,
            self.res_dual,
            self.gap_abs,
            self.scale,
            self.solve_time
        )
        .ok();
    }

    fn print_footer(&mut self, settings: &DefaultSettings<T>) {
        if !settings.verbose {
            return;
        }
        let out = &mut self.stream;

        writeln!(
            out,
            "-------------------------------------------------------------------------------------"
        )
        .ok();
        writeln!(out, "Terminated with status = {}", self.status).ok();
        if self.scale_updates > 0 {
            writeln!(
                out,
                "scale updates = {}, final scale = {:.1e}",
                self.scale_updates, self.scale
            )
            .ok();
        }
        if self.accel_rejections > 0 {
            writeln!(out, "acceleration steps rejected = {}", self.accel_rejections).ok();
        }
        writeln!(
            out,
            "solve time = {:?}",
            Duration::from_secs_f64(self.solve_time)
        )
        .ok();
        out.flush().ok();
    }
}

fn _print_configuration<T: FloatT>(
    out: &mut PrintTarget,
    settings: &DefaultSettings<T>,
    data: &DefaultProblemData<T>,
    cones: &CompositeCone<T>,
) -> std::io::Result<()> {
    writeln!(out, "\nsplitcone v{}  -  conic operator splitting", VERSION)?;

    writeln!(out, "\nproblem:")?;
    writeln!(out, "  variables     = {}", data.n)?;
    writeln!(out, "  constraints   = {}", data.m)?;
    writeln!(out, "  nnz(P)        = {}", data.P.nnz())?;
    writeln!(out, "  nnz(A)        = {}", data.A.nnz())?;
    writeln!(out, "  cones (total) = {}", cones.len())?;

    _print_conedims_by_type(out, cones, SupportedConeTag::ZeroCone)?;
    _print_conedims_by_type(out, cones, SupportedConeTag::NonnegativeCone)?;
    _print_conedims_by_type(out, cones, SupportedConeTag::BoxCone)?;
    _print_conedims_by_type(out, cones, SupportedConeTag::SecondOrderCone)?;
    _print_conedims_by_type(out, cones, SupportedConeTag::ExponentialCone)?;
    _print_conedims_by_type(out, cones, SupportedConeTag::DualExponentialCone)?;
    _print_conedims_by_type(out, cones, SupportedConeTag::PowerCone)?;
    _print_conedims_by_type(out, cones, SupportedConeTag::PSDTriangleCone)?;

    writeln!(out,)?;
    _print_settings(out, settings)?;

    std::io::Result::Ok(())
}

fn _print_settings<T: FloatT>(
    out: &mut PrintTarget,
    set: &DefaultSettings<T>,
) -> std::io::Result<()> {
    writeln!(out, "settings:")?;

    writeln!(
        out,
        "  linear algebra: direct / {}, precision: {} bit",
        set.direct_solve_method,
        _get_precision_string::<T>()
    )?;

    let time_lim_str = {
        if set.time_limit == 0.0 {
            "none".to_string()
        } else {
            format!("{:?}", Duration::from_secs_f64(set.time_limit))
        }
    };
    writeln!(
        out,
        "  max iter = {}, time limit = {}, alpha = {:.3}",
        set.max_iters, time_lim_str, set.alpha
    )?;

    writeln!(
        out,
        "  eps_abs = {:.1e}, eps_rel = {:.1e}, eps_infeas = {:.1e}",
        set.eps_abs, set.eps_rel, set.eps_infeas
    )?;

    writeln!(
        out,
        "  metric: rho_x = {:.1e}, scale = {:.1e}, adaptive = {}",
        set.rho_x,
        set.scale,
        _bool_on_off(set.adaptive_scale)
    )?;

    writeln!(
        out,
        "  acceleration: lookback = {}, interval = {}",
        set.acceleration_lookback, set.acceleration_interval
    )?;

    writeln!(
        out,
        "  equilibrate: {}, min_scale = {:.1e}, max_scale = {:.1e}, max iter = {}",
        _bool_on_off(set.normalize),
        set.equilibrate_min_scaling,
        set.equilibrate_max_scaling,
        set.equilibrate_max_iter
    )?;

    writeln!(out,)?;

    std::io::Result::Ok(())
}

fn _bool_on_off(v: bool) -> &'static str {
    match v {
        true => "on",
        false => "off",
    }
}

fn _get_precision_string<T: FloatT>() -> String {
    (::std::mem::size_of::<T>() * 8).to_string()
}

fn _print_conedims_by_type<T: FloatT>(
    out: &mut PrintTarget,
    cones: &CompositeCone<T>,
    conetag: SupportedConeTag,
) -> std::io::Result<()> {
    let maxlistlen = 5;

    let count = cones.get_type_count(conetag);

    //skip if there are none of this type
    if count == 0 {
        return std::io::Result::Ok(());
    }

    // drops trailing "Cone" part of name
    let name = conetag.as_str();
    let name = &name[0..name.len() - 4];
    let name = format!("{name:>19}");

    let mut nvars = Vec::with_capacity(count);
    for cone in cones.iter() {
        if cone.as_tag() == conetag {
            nvars.push(cone.numel());
        }
    }
    write!(out, "    : {name} = {count}, ")?;

    if count == 1 {
        write!(out, " numel = {}", nvars[0])?;
    } else if count <= maxlistlen {
        //print them all
        write!(out, " numel = (")?;
        for nvar in nvars.iter().take(nvars.len() - 1) {
            write!(out, "{nvar},")?;
        }
        write!(out, "{})", nvars[nvars.len() - 1])?;
    } else {
        // print first (maxlistlen-1) and the final one
        write!(out, " numel = (")?;
        for nvar in nvars.iter().take(maxlistlen - 1) {
            write!(out, "{nvar},")?;
        }
        write!(out, "...,{})", nvars[nvars.len() - 1])?;
    }

    writeln!(out,)?;

    std::io::Result::Ok(())
}
