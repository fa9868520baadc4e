use promql_formatter::format_query;

fn main() {
    let queries: Vec<String> = match std::env::args().nth(1) {
        Some(query) => vec![query],
        None => vec![
            r#"sum(increase(ads_filter_after_total{env="live", region="$region"}[10m])) by (bundle) offset 1w"#.to_string(),
            r#"(sum(increase(pass_rcmd_gps{l0="true"}[1m])) by (l1) / sum(increase(pass_rcmd_gps{}[1m])) by (l1) < 0.2) and on(l1) (sum(increase(pass_rcmd_gps{}[1m])) by (l1) > 10)"#.to_string(),
        ],
    };

    for query in queries {
        println!("Input:\n{query}\n");
        match format_query(&query) {
            Ok(formatted) => println!("Formatted:\n{formatted}\n"),
            Err(err) => println!("Error: {err}\n"),
        }
    }
}
