//! Writes three small, deterministic Reclame Aqui exports
//! (`RECLAMEAQUI_HAPVIDA.csv`, `RECLAMEAQUI_IBYTE.csv`,
//! `RECLAMEAQUI_NAGEM.csv`) into the directory given as the first
//! argument, or the current directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate};

const ROWS_PER_COMPANY: usize = 400;

const LOCATIONS: [&str; 8] = ["SP", "RJ", "CE", "PE", "BA", "MG", "RN", "PA"];
const STATUSES: [&str; 4] = ["Resolvido", "Não resolvido", "Respondida", "Em réplica"];

const PHRASES: [&str; 10] = [
    "Fiz a compra e o produto nunca foi entregue.",
    "O atendimento não resolveu o meu problema.",
    "Cobrança indevida na fatura deste mês.",
    "Consulta marcada foi cancelada sem aviso.",
    "Aguardo retorno há mais de trinta dias.",
    "O produto chegou com defeito e a troca foi negada.",
    "Ninguém responde no telefone nem no chat.",
    "Pedi o reembolso e até agora nada.",
    "A autorização do exame está atrasada.",
    "Solicito uma solução urgente para o caso.",
];

struct Company {
    name: &'static str,
    file: &'static str,
    theme: &'static str,
}

const COMPANIES: [Company; 3] = [
    Company { name: "Hapvida", file: "RECLAMEAQUI_HAPVIDA.csv", theme: "plano de saúde" },
    Company { name: "Ibyte", file: "RECLAMEAQUI_IBYTE.csv", theme: "eletrônicos" },
    Company { name: "Nagem", file: "RECLAMEAQUI_NAGEM.csv", theme: "varejo" },
];

/// SplitMix64: tiny, seedable, good enough for fake data.
struct SplitMix(u64);

impl SplitMix {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

fn description(rng: &mut SplitMix) -> String {
    // 1..=12 phrases spreads lengths across all four categories.
    let n = 1 + rng.below(12);
    (0..n).map(|_| rng.pick(&PHRASES)).collect::<Vec<_>>().join(" ")
}

fn main() -> Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let first_day = NaiveDate::from_ymd_opt(2021, 1, 1).context("invalid start date")?;

    for (seed, company) in COMPANIES.iter().enumerate() {
        let mut rng = SplitMix(42 + seed as u64);
        let path = out_dir.join(company.file);
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("creating {}", path.display()))?;

        writer.write_record([
            "ID", "TEMA", "LOCAL", "STATUS", "DESCRICAO", "ANO", "MES", "DIA", "CASOS",
        ])?;

        for id in 0..ROWS_PER_COMPANY {
            let date = first_day + Duration::days(rng.below(730) as i64);
            writer.write_record([
                format!("{}-{id}", company.name.to_lowercase()),
                company.theme.to_string(),
                rng.pick(&LOCATIONS).to_string(),
                rng.pick(&STATUSES).to_string(),
                description(&mut rng),
                date.year().to_string(),
                date.month().to_string(),
                date.day().to_string(),
                (1 + rng.below(3)).to_string(),
            ])?;
        }
        writer.flush()?;

        println!("Wrote {ROWS_PER_COMPANY} complaints for {} to {}", company.name, path.display());
    }

    Ok(())
}
