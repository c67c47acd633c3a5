use serde::{Deserialize, Serialize};

/// Fuel types plotted in the regional generation-mix chart, in stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Biomass,
    Coal,
    Gas,
    Hydro,
    Imports,
    Nuclear,
    Oil,
    Solar,
    Wind,
    Other,
}

impl FuelType {
    pub const ALL: [FuelType; 10] = [
        FuelType::Biomass,
        FuelType::Coal,
        FuelType::Gas,
        FuelType::Hydro,
        FuelType::Imports,
        FuelType::Nuclear,
        FuelType::Oil,
        FuelType::Solar,
        FuelType::Wind,
        FuelType::Other,
    ];

    /// Upstream `fuel` name and record field name.
    pub fn key(self) -> &'static str {
        match self {
            FuelType::Biomass => "biomass",
            FuelType::Coal => "coal",
            FuelType::Gas => "gas",
            FuelType::Hydro => "hydro",
            FuelType::Imports => "imports",
            FuelType::Nuclear => "nuclear",
            FuelType::Oil => "oil",
            FuelType::Solar => "solar",
            FuelType::Wind => "wind",
            FuelType::Other => "other",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|fuel| fuel.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            FuelType::Biomass => "Biomass",
            FuelType::Coal => "Coal",
            FuelType::Gas => "Gas",
            FuelType::Hydro => "Hydro",
            FuelType::Imports => "Imports",
            FuelType::Nuclear => "Nuclear",
            FuelType::Oil => "Oil",
            FuelType::Solar => "Solar",
            FuelType::Wind => "Wind",
            FuelType::Other => "Other",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            FuelType::Biomass => "#409349",
            FuelType::Coal => "#646464",
            FuelType::Gas => "#25c5ff",
            FuelType::Hydro => "#69c0ef",
            FuelType::Imports => "#FF6384",
            FuelType::Nuclear => "#d1ff99",
            FuelType::Oil => "#776556",
            FuelType::Solar => "#FFC425",
            FuelType::Wind => "#bedee5",
            FuelType::Other => "#9575b9",
        }
    }
}

/// Percentage share of each fuel for one region and period.
///
/// Shares are carried through as published; they are not renormalized to 100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FuelShares {
    pub biomass: f64,
    pub coal: f64,
    pub gas: f64,
    pub hydro: f64,
    pub imports: f64,
    pub nuclear: f64,
    pub oil: f64,
    pub solar: f64,
    pub wind: f64,
    pub other: f64,
}

impl FuelShares {
    pub fn get(&self, fuel: FuelType) -> f64 {
        match fuel {
            FuelType::Biomass => self.biomass,
            FuelType::Coal => self.coal,
            FuelType::Gas => self.gas,
            FuelType::Hydro => self.hydro,
            FuelType::Imports => self.imports,
            FuelType::Nuclear => self.nuclear,
            FuelType::Oil => self.oil,
            FuelType::Solar => self.solar,
            FuelType::Wind => self.wind,
            FuelType::Other => self.other,
        }
    }

    fn slot_mut(&mut self, fuel: FuelType) -> &mut f64 {
        match fuel {
            FuelType::Biomass => &mut self.biomass,
            FuelType::Coal => &mut self.coal,
            FuelType::Gas => &mut self.gas,
            FuelType::Hydro => &mut self.hydro,
            FuelType::Imports => &mut self.imports,
            FuelType::Nuclear => &mut self.nuclear,
            FuelType::Oil => &mut self.oil,
            FuelType::Solar => &mut self.solar,
            FuelType::Wind => &mut self.wind,
            FuelType::Other => &mut self.other,
        }
    }

    pub fn with_share(mut self, fuel: FuelType, share: f64) -> Self {
        *self.slot_mut(fuel) = share;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (FuelType, f64)> + '_ {
        FuelType::ALL.into_iter().map(move |fuel| (fuel, self.get(fuel)))
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, share)| share).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_key() {
        for fuel in FuelType::ALL {
            assert_eq!(FuelType::from_key(fuel.key()), Some(fuel));
        }
        assert_eq!(FuelType::from_key("peat"), None);
    }

    #[test]
    fn serialized_shares_use_fuel_keys() {
        let shares = FuelShares::default().with_share(FuelType::Wind, 42.5);
        let value = serde_json::to_value(shares).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 10);
        for fuel in FuelType::ALL {
            assert!(object.contains_key(fuel.key()));
        }
        assert_eq!(object["wind"], 42.5);
    }

    #[test]
    fn total_sums_every_fuel() {
        let shares = FuelShares::default()
            .with_share(FuelType::Gas, 30.0)
            .with_share(FuelType::Nuclear, 20.5)
            .with_share(FuelType::Other, 0.5);
        assert_eq!(shares.total(), 51.0);
    }
}
