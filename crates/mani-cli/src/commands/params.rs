//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use mani_chorus::ChorusParam;
use mani_core::ParamDescriptor;

#[derive(Args)]
pub struct ParamsArgs {
    /// Show details for a single parameter (name or id)
    #[arg(value_name = "PARAM")]
    param: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    if let Some(query) = &args.param {
        let param = find_param(query)
            .ok_or_else(|| anyhow::anyhow!("Unknown parameter: {}", query))?;
        print_detail(param);
        return Ok(());
    }

    println!("Chorus Parameters");
    println!("=================");
    println!();
    println!(
        "  {:4}  {:10}  {:6}  {:10}  {:6}  {:8}  {:5}  {}",
        "ID", "Name", "Short", "Range", "Step", "Default", "Unit", "Behavior"
    );
    println!(
        "  {:4}  {:10}  {:6}  {:10}  {:6}  {:8}  {:5}  {}",
        "--", "----", "-----", "-----", "----", "-------", "----", "--------"
    );

    for param in ChorusParam::ALL {
        let desc = param.descriptor();
        println!(
            "  {:4}  {:10}  {:6}  {:10}  {:6}  {:8}  {:5}  {}",
            param.id(),
            desc.string_id,
            desc.short_name,
            range_label(&desc),
            desc.step,
            default_label(&desc),
            unit_label(&desc),
            behavior(param)
        );
    }

    println!();
    println!("Example usage:");
    println!();
    println!("  mani process input.wav output.wav --mix 0.5 --rate 0.3 --depth 0.6 --feedback");
    Ok(())
}

fn find_param(query: &str) -> Option<ChorusParam> {
    if let Ok(id) = query.parse::<u32>() {
        return ChorusParam::from_id(id);
    }
    ChorusParam::ALL.into_iter().find(|p| {
        let desc = p.descriptor();
        desc.string_id.eq_ignore_ascii_case(query) || desc.name.eq_ignore_ascii_case(query)
    })
}

fn print_detail(param: ChorusParam) {
    let desc = param.descriptor();
    println!("{}", desc.name);
    println!("{}", "=".repeat(desc.name.len()));
    println!();
    println!("  ID:       {}", param.id());
    println!("  Key:      {}", desc.string_id);
    println!("  Short:    {}", desc.short_name);
    println!("  Range:    {}", range_label(&desc));
    println!("  Step:     {}", desc.step);
    println!("  Default:  {}", default_label(&desc));
    println!("  Unit:     {}", unit_label(&desc));
    println!("  Behavior: {}", behavior(param));

    if !desc.is_toggle() {
        println!();
        for level in [0.0, 0.25, 0.5, 0.75, 1.0] {
            println!("  {}", mapping_line(param, &desc, level));
        }
    }
}

fn mapping_line(param: ChorusParam, desc: &ParamDescriptor, level: f32) -> String {
    format!(
        "{:.2} -> {:.3}{}",
        level,
        param.display_value(level),
        desc.unit.suffix()
    )
}

fn unit_label(desc: &ParamDescriptor) -> &'static str {
    match desc.unit.suffix().trim() {
        "" => "-",
        unit => unit,
    }
}

fn range_label(desc: &ParamDescriptor) -> String {
    if desc.is_toggle() {
        "off/on".to_string()
    } else {
        format!("{:.0}-{:.0}", desc.min, desc.max)
    }
}

fn default_label(desc: &ParamDescriptor) -> String {
    if desc.is_toggle() {
        if desc.default == 1.0 { "on" } else { "off" }.to_string()
    } else {
        format!("{:.2}", desc.default)
    }
}

fn behavior(param: ChorusParam) -> &'static str {
    match param {
        ChorusParam::Mix => "dry/wet blend, 20 ms ramp",
        ChorusParam::Rate => "LFO 0.05-20 Hz (quartic), 100 ms ramp",
        ChorusParam::Depth => "0-5 ms modulation (cubic), 100 ms ramp",
        ChorusParam::Feedback => "feed delayed signal back into the line",
        ChorusParam::Delay => "add 10 ms predelay",
    }
}
