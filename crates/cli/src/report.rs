use anyhow::Result;
use teamnet_graph::{AssembledNetwork, EdgeKind};
use teamnet_protocol::GraphDocument;

const TOP_ROWS: usize = 10;

pub fn render_network_report(network: &AssembledNetwork) -> Result<String> {
    let doc = &network.document;

    let mut md = String::new();
    md.push_str("# Team network report\n\n");
    md.push_str(&format!(
        "- People: `{}` (shown: `{}`)\n",
        doc.summary.people, doc.summary.visible_people
    ));
    md.push_str(&format!("- Edges: `{}`\n", doc.summary.edges));
    md.push_str(&format!(
        "- Edge kinds: `{}`\n",
        doc.summary.edge_kinds.join(", ")
    ));
    if doc.filter_fallback {
        md.push_str("- Personality filter: matched nobody, full roster shown\n");
    }
    md.push('\n');

    if !doc.notices.is_empty() {
        md.push_str("## Notices\n\n");
        for notice in &doc.notices {
            md.push_str(&format!("- {}\n", escape_cell(notice)));
        }
        md.push('\n');
    }

    render_edge_kinds(&mut md, doc);
    render_connected(&mut md, doc);
    render_centrality(&mut md, doc);
    render_chemistry(&mut md, doc);
    render_composition(&mut md, doc);
    render_focus(&mut md, network)?;
    render_poster(&mut md, doc);

    if !doc.missing_images.is_empty() {
        md.push_str("## Missing images\n\n");
        for line in &doc.missing_images {
            md.push_str(&format!("- {}\n", escape_cell(line)));
        }
        md.push('\n');
    }

    Ok(md)
}

fn render_edge_kinds(md: &mut String, doc: &GraphDocument) {
    if doc.edges.is_empty() {
        return;
    }
    md.push_str("## Edges by leading kind\n\n");
    md.push_str("| kind | edges | colour |\n");
    md.push_str("|---|---:|---|\n");
    for kind in EdgeKind::ALL {
        let count = doc.edges.iter().filter(|e| e.edge_type == kind.key()).count();
        if count > 0 {
            md.push_str(&format!("| {} | `{count}` | `{}` |\n", kind.phrase(), kind.color()));
        }
    }
    md.push('\n');
}

fn render_connected(md: &mut String, doc: &GraphDocument) {
    let mut nodes: Vec<_> = doc.nodes.iter().collect();
    nodes.sort_by(|a, b| b.stats.degree.cmp(&a.stats.degree).then_with(|| a.id.cmp(&b.id)));

    md.push_str("## Most connected\n\n");
    md.push_str("| person | department | degree | same dept | same type | same cohort |\n");
    md.push_str("|---|---|---:|---:|---:|---:|\n");
    for node in nodes.into_iter().take(TOP_ROWS) {
        md.push_str(&format!(
            "| {} (`{}`) | {} | `{}` | `{}` | `{}` | `{}` |\n",
            escape_cell(&node.profile.name),
            node.id,
            escape_cell(node.group.as_deref().unwrap_or("-")),
            node.stats.degree,
            node.stats.same_department,
            node.stats.same_personality,
            node.stats.same_cohort
        ));
    }
    md.push('\n');
}

fn render_centrality(md: &mut String, doc: &GraphDocument) {
    let mut rows: Vec<_> = doc.centrality.iter().collect();
    rows.sort_by(|a, b| {
        b.betweenness
            .total_cmp(&a.betweenness)
            .then_with(|| b.degree.total_cmp(&a.degree))
            .then_with(|| a.handle.cmp(&b.handle))
    });

    md.push_str("## Centrality\n\n");
    md.push_str("| person | degree | betweenness | closeness | eigenvector |\n");
    md.push_str("|---|---:|---:|---:|---:|\n");
    for row in rows.into_iter().take(TOP_ROWS) {
        md.push_str(&format!(
            "| {} | `{:.3}` | `{:.3}` | `{:.3}` | `{}` |\n",
            escape_cell(&row.name),
            row.degree,
            row.betweenness,
            row.closeness,
            row.eigenvector
                .map_or("n/a".to_string(), |v| format!("{v:.3}"))
        ));
    }
    md.push('\n');
}

fn render_chemistry(md: &mut String, doc: &GraphDocument) {
    let chem = &doc.chemistry;
    md.push_str("## Team chemistry\n\n");
    if chem.pair_count == 0 {
        md.push_str("No pairs share an enabled attribute.\n\n");
        return;
    }
    md.push_str(&format!(
        "- Mean score: `{:.2}` (max `{}`)\n- Pairs: `{}`\n\n",
        chem.mean_score, chem.max_score, chem.pair_count
    ));
    md.push_str("| A | B | score | shared |\n");
    md.push_str("|---|---|---:|---|\n");
    for pair in &chem.top_pairs {
        md.push_str(&format!(
            "| {} | {} | `{}` | {} |\n",
            escape_cell(&pair.a_label),
            escape_cell(&pair.b_label),
            pair.score,
            pair.reasons.join(", ")
        ));
    }
    md.push_str("\n| score | pairs |\n|---:|---:|\n");
    for (score, count) in &chem.histogram {
        md.push_str(&format!("| `{score}` | `{count}` |\n"));
    }
    md.push('\n');
}

fn render_composition(md: &mut String, doc: &GraphDocument) {
    let comp = &doc.composition;
    md.push_str("## Composition\n\n");

    if !comp.personality_counts.is_empty() {
        md.push_str("| type | people |\n|---|---:|\n");
        for (code, count) in &comp.personality_counts {
            md.push_str(&format!("| {code} | `{count}` |\n"));
        }
        md.push('\n');
    }

    for axis in [&comp.energy, &comp.decision] {
        md.push_str(&format!(
            "- {} `{}` / {} `{}`\n",
            axis.left, axis.left_count, axis.right, axis.right_count
        ));
    }
    for ratio in &comp.axis_ratios {
        md.push_str(&format!(
            "- {}: `{:.1}%` / `{:.1}%`\n",
            ratio.axis, ratio.left_pct, ratio.right_pct
        ));
    }
    md.push('\n');

    if !comp.join_years.is_empty() {
        md.push_str("| join year | people |\n|---:|---:|\n");
        for (year, count) in &comp.join_years {
            md.push_str(&format!("| {year} | `{count}` |\n"));
        }
        md.push('\n');
    }

    if !comp.department_ratios.is_empty() {
        md.push_str("| department | I % | T % | entropy |\n|---|---:|---:|---:|\n");
        for ratio in &comp.department_ratios {
            let entropy = comp
                .diversity
                .iter()
                .find(|d| d.department == ratio.department)
                .map_or("-".to_string(), |d| format!("{:.2}", d.entropy));
            md.push_str(&format!(
                "| {} | `{:.1}` | `{:.1}` | `{entropy}` |\n",
                escape_cell(&ratio.department),
                ratio.introvert_pct,
                ratio.thinking_pct
            ));
        }
        md.push('\n');
    }

    if !comp.generations.is_empty() {
        md.push_str("| generation | people |\n|---|---:|\n");
        for (generation, count) in &comp.generations {
            md.push_str(&format!("| {} | `{count}` |\n", generation.label()));
        }
        md.push('\n');
    }
}

fn render_focus(md: &mut String, network: &AssembledNetwork) -> Result<()> {
    let Some(handle) = network.document.focus.as_deref() else {
        return Ok(());
    };
    let person = network.person(handle)?;
    let neighbors = network.graph.neighbors_of(handle)?;

    md.push_str(&format!("## Around {}\n\n", escape_cell(&person.label())));
    if neighbors.is_empty() {
        md.push_str("No direct connections.\n\n");
        return Ok(());
    }
    md.push_str("| person | shared |\n|---|---|\n");
    for neighbor in neighbors {
        md.push_str(&format!(
            "| {} | {} |\n",
            escape_cell(&neighbor.node.person.label()),
            neighbor
                .edge
                .reasons
                .iter()
                .map(|k| k.phrase())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    md.push('\n');
    Ok(())
}

fn render_poster(md: &mut String, doc: &GraphDocument) {
    if doc.poster.is_empty() {
        return;
    }
    md.push_str("## Team poster\n\n");
    for section in &doc.poster {
        md.push_str(&format!("### {}\n\n", escape_cell(&section.department)));
        for card in &section.cards {
            let mut line = format!("- **{}**", escape_cell(&card.name));
            if let Some(role) = &card.role {
                line.push_str(&format!(" · {}", escape_cell(role)));
            }
            if let Some(year) = card.join_year {
                line.push_str(&format!(" · joined {year}"));
            }
            if let Some(code) = &card.personality {
                line.push_str(&format!(" · {code}"));
            }
            md.push_str(&line);
            md.push('\n');
        }
        md.push('\n');
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
