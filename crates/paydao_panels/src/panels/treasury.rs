/// One summary tile of the treasury overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreasuryStat {
    pub title: &'static str,
    pub value: &'static str,
    pub change: &'static str,
}

impl TreasuryStat {
    pub fn change_line(&self) -> String {
        format!("{} from last month", self.change)
    }
}

/// Public treasury figures. Display-only; not derived from the store or the
/// chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreasuryOverviewData {
    pub stats: [TreasuryStat; 4],
}

impl TreasuryOverviewData {
    pub fn hardcoded() -> Self {
        Self {
            stats: [
                TreasuryStat {
                    title: "Total Treasury",
                    value: "$2,847,392",
                    change: "+12.3%",
                },
                TreasuryStat {
                    title: "Monthly Payouts",
                    value: "$156,240",
                    change: "+8.7%",
                },
                TreasuryStat {
                    title: "Active Contributors",
                    value: "47",
                    change: "+3",
                },
                TreasuryStat {
                    title: "Growth Rate",
                    value: "23.4%",
                    change: "+2.1%",
                },
            ],
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Treasury Overview  [Public]\n");
        for stat in &self.stats {
            out.push_str(&format!(
                "  {:<20} {:>12}  {}\n",
                stat.title,
                stat.value,
                stat.change_line()
            ));
        }
        out
    }
}

impl Default for TreasuryOverviewData {
    fn default() -> Self {
        Self::hardcoded()
    }
}
