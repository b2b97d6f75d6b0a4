use yuletide_core::ChristmasMatcher;

pub fn run(text: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let matcher = ChristmasMatcher::new();
    match text {
        None => {
            for pattern in matcher.pattern_set().patterns() {
                println!("{pattern}");
            }
        }
        Some(text) => {
            let hits = matcher.matching_patterns(&text);
            if hits.is_empty() {
                println!("no match: {text}");
            } else {
                for pattern in hits {
                    println!("match: {pattern}");
                }
            }
        }
    }
    Ok(())
}
