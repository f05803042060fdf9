use anyhow::{anyhow, Result};
use cssel::selectors::{parse, Namespaces, SelectorConfig, SelectorError};
use cssel::syntax::{parse_component_value_list, ComponentValue};
use simple_logger::SimpleLogger;

fn main() -> Result<()> {
    let matches = clap::Command::new("cssel selector parser")
        .version("0.1.0")
        .arg(
            clap::Arg::new("selector")
                .help("The selector list to parse")
                .required(true)
                .index(1),
        )
        .arg(
            clap::Arg::new("namespace")
                .help("Namespace prefix declaration as prefix=url, can be repeated")
                .short('n')
                .long("namespace")
                .action(clap::ArgAction::Append),
        )
        .arg(
            clap::Arg::new("default-namespace")
                .help("Namespace url for unprefixed type selectors")
                .long("default-namespace"),
        )
        .arg(
            clap::Arg::new("forgiving")
                .help("Drop invalid selectors instead of failing")
                .long("forgiving")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("relative")
                .help("Parse relative selectors, as in :has()")
                .long("relative")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("tokens")
                .help("Just print the component values")
                .long("tokens")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("debug")
                .help("Enable debug logging")
                .short('d')
                .long("debug")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let selector = matches
        .get_one::<String>("selector")
        .ok_or_else(|| anyhow!("missing selector"))?
        .clone();

    if matches.get_flag("debug") {
        SimpleLogger::new().init()?;
    }

    let values = parse_component_value_list(&selector);
    log::debug!("{} component values in {selector:?}", values.len());
    if matches.get_flag("tokens") {
        print_values(&values, 0);
        return Ok(());
    }

    let mut namespaces = Namespaces::new();
    if let Some(url) = matches.get_one::<String>("default-namespace") {
        namespaces = namespaces.with_default(url);
    }
    for declaration in matches.get_many::<String>("namespace").into_iter().flatten() {
        let (prefix, url) = declaration
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid namespace declaration '{declaration}', expected prefix=url"))?;
        namespaces = namespaces.with_prefix(prefix, url);
    }

    let config = SelectorConfig {
        forgiving: matches.get_flag("forgiving"),
        relative: matches.get_flag("relative"),
        ..Default::default()
    };

    for result in parse(&values, &namespaces, config) {
        match result {
            Ok(parsed) => {
                print!("{parsed}  specificity {}", parsed.specificity());
                if let Some(pseudo_element) = parsed.pseudo_element() {
                    print!("  pseudo-element {pseudo_element}");
                }
                println!();
            }
            Err(err) => {
                display_snippet(&selector, &err);
                return Err(anyhow!(err));
            }
        }
    }

    Ok(())
}

/// Prints the line of the selector the error points to, with a marker under the offending token
fn display_snippet(selector: &str, err: &SelectorError) {
    let token = err.token.as_ref().map_or_else(|| "EOF".to_string(), ToString::to_string);
    println!("error at {token}");

    let Some(location) = err.location() else {
        println!("{selector}");
        println!("{}^", " ".repeat(selector.chars().count()));
        return;
    };

    let line = selector.lines().nth(location.line - 1).unwrap_or_default();
    println!("{line}");
    println!("{}^", " ".repeat(location.column.saturating_sub(1)));
}

fn print_values(values: &[ComponentValue], indent: usize) {
    for value in values {
        println!("{:indent$}{:<12} {}", "", value.type_name(), value, indent = indent);
        match value {
            ComponentValue::Function { arguments, .. } => print_values(arguments, indent + 2),
            ComponentValue::Block { content, .. } => print_values(content, indent + 2),
            ComponentValue::Token(_) => {}
        }
    }
}
