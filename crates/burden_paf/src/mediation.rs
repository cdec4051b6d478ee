//! Mediation-adjusted joint aggregation of per-risk PAFs.
//!
//! Two dietary risks can act on a disease through the same pathway (milk
//! intake through calcium, fiber through fruits, vegetables and whole
//! grains). The mediation tensor `M[mediator, mediated, disease]` removes the
//! overlap before risks are combined:
//!
//! ```text
//! PAF_J = 1 − Π_r (1 − P_r · Π_j (1 − M[r, j, d]))
//! ```
//!
//! # Views
//!
//! Replacing the tensor by a view collapses the joint formula to one risk:
//!
//! - [`MediationTensor::non_joint_view`]: every entry 1 except the risk's
//!   row, which is 0. The joint PAF becomes the risk's own PAF.
//! - [`MediationTensor::joint_view`]: every entry 1 except the risk's row,
//!   which is kept from the full tensor. The joint PAF becomes the risk's
//!   mediation-scaled PAF.

use crate::error::PafError;
use burden_core::types::{DiseaseId, LookupError, Registry, RiskId};
use std::collections::BTreeSet;

/// One non-zero mediation entry, by name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediationTriple {
    /// Risk whose effect runs through another risk.
    pub mediator: String,
    /// Risk carrying the effect.
    pub mediated: String,
    /// Disease the overlap applies to.
    pub disease: String,
    /// Overlap fraction in `[0, 1]`.
    pub value: f64,
}

impl MediationTriple {
    /// Creates a triple.
    pub fn new(
        mediator: impl Into<String>,
        mediated: impl Into<String>,
        disease: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            mediator: mediator.into(),
            mediated: mediated.into(),
            disease: disease.into(),
            value,
        }
    }
}

/// Mediation entries and the risks exempt from the mediation factor in the
/// joint-PAF derivative.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MediationConfig {
    /// Non-zero tensor entries.
    pub triples: Vec<MediationTriple>,
    /// Risks whose derivative skips `Π_j (1 − M[r, j, d])`.
    pub derivative_exempt_risks: Vec<String>,
}

impl Default for MediationConfig {
    fn default() -> Self {
        Self {
            triples: vec![
                MediationTriple::new(
                    "Diet low in milk",
                    "Diet low in calcium",
                    "Colon and rectum cancer",
                    1.0,
                ),
                MediationTriple::new(
                    "Diet low in fiber",
                    "Diet low in fruits",
                    "Ischemic heart disease",
                    1.0,
                ),
                MediationTriple::new(
                    "Diet low in fiber",
                    "Diet low in vegetables",
                    "Ischemic heart disease",
                    1.0,
                ),
                MediationTriple::new(
                    "Diet low in fiber",
                    "Diet low in whole grains",
                    "Ischemic heart disease",
                    1.0,
                ),
            ],
            derivative_exempt_risks: vec![
                "Diet low in milk".to_string(),
                "Diet low in fiber".to_string(),
            ],
        }
    }
}

/// Dense `(mediator, mediated, disease)` tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct MediationTensor {
    risks: usize,
    diseases: usize,
    values: Vec<f64>,
}

impl MediationTensor {
    /// All-zero tensor.
    pub fn zeros(risks: usize, diseases: usize) -> Self {
        Self::filled(risks, diseases, 0.0)
    }

    fn filled(risks: usize, diseases: usize, value: f64) -> Self {
        Self {
            risks,
            diseases,
            values: vec![value; risks * risks * diseases],
        }
    }

    /// Tensor sized for `registry` with the named triples set.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::UnknownName` if a triple names an unregistered
    /// risk or disease.
    pub fn from_triples(registry: &Registry, triples: &[MediationTriple]) -> Result<Self, LookupError> {
        let dims = registry.dimensions();
        let mut tensor = Self::zeros(dims.risks, dims.diseases);
        for t in triples {
            let mediator = registry.risk(&t.mediator)?;
            let mediated = registry.risk(&t.mediated)?;
            let disease = registry.disease(&t.disease)?;
            let i = tensor.offset(mediator.0, mediated.0, disease.0);
            tensor.values[i] = t.value;
        }
        Ok(tensor)
    }

    #[inline]
    fn offset(&self, mediator: usize, mediated: usize, disease: usize) -> usize {
        (mediator * self.risks + mediated) * self.diseases + disease
    }

    /// Number of risks.
    #[inline]
    pub fn risks(&self) -> usize {
        self.risks
    }

    /// Number of diseases.
    #[inline]
    pub fn diseases(&self) -> usize {
        self.diseases
    }

    fn check_risk(&self, risk: RiskId) -> Result<(), PafError> {
        if risk.0 >= self.risks {
            return Err(PafError::IndexOutOfRange {
                axis: "risk",
                index: risk.0,
                size: self.risks,
            });
        }
        Ok(())
    }

    fn check_disease(&self, disease: DiseaseId) -> Result<(), PafError> {
        if disease.0 >= self.diseases {
            return Err(PafError::IndexOutOfRange {
                axis: "disease",
                index: disease.0,
                size: self.diseases,
            });
        }
        Ok(())
    }

    /// Entry `M[mediator, mediated, disease]`.
    pub fn get(&self, mediator: RiskId, mediated: RiskId, disease: DiseaseId) -> Result<f64, PafError> {
        self.check_risk(mediator)?;
        self.check_risk(mediated)?;
        self.check_disease(disease)?;
        Ok(self.values[self.offset(mediator.0, mediated.0, disease.0)])
    }

    /// Sets `M[mediator, mediated, disease]`.
    pub fn set(
        &mut self,
        mediator: RiskId,
        mediated: RiskId,
        disease: DiseaseId,
        value: f64,
    ) -> Result<(), PafError> {
        self.check_risk(mediator)?;
        self.check_risk(mediated)?;
        self.check_disease(disease)?;
        let i = self.offset(mediator.0, mediated.0, disease.0);
        self.values[i] = value;
        Ok(())
    }

    /// Mediation factor of a risk, `Π_j (1 − M[r, j, d])`.
    pub fn row_factor(&self, risk: RiskId, disease: DiseaseId) -> Result<f64, PafError> {
        self.check_risk(risk)?;
        self.check_disease(disease)?;
        Ok(self.row_factor_unchecked(risk.0, disease.0))
    }

    fn row_factor_unchecked(&self, risk: usize, disease: usize) -> f64 {
        (0..self.risks)
            .map(|j| 1.0 - self.values[self.offset(risk, j, disease)])
            .product()
    }

    /// View isolating a risk's unmediated PAF.
    pub fn non_joint_view(&self, risk: RiskId) -> Result<Self, PafError> {
        self.check_risk(risk)?;
        let mut view = Self::filled(self.risks, self.diseases, 1.0);
        for j in 0..self.risks {
            for d in 0..self.diseases {
                let i = view.offset(risk.0, j, d);
                view.values[i] = 0.0;
            }
        }
        Ok(view)
    }

    /// View isolating a risk's mediation-scaled PAF.
    pub fn joint_view(&self, risk: RiskId) -> Result<Self, PafError> {
        self.check_risk(risk)?;
        let mut view = Self::filled(self.risks, self.diseases, 1.0);
        for j in 0..self.risks {
            for d in 0..self.diseases {
                let i = view.offset(risk.0, j, d);
                view.values[i] = self.values[i];
            }
        }
        Ok(view)
    }

    /// The view of `kind` for `risk`.
    pub fn view(&self, kind: MediationView, risk: RiskId) -> Result<Self, PafError> {
        match kind {
            MediationView::Joint => self.joint_view(risk),
            MediationView::NonJoint => self.non_joint_view(risk),
        }
    }

    fn check_len(&self, len: usize) -> Result<(), PafError> {
        if len != self.risks {
            return Err(PafError::ShapeMismatch {
                expected: self.risks,
                got: len,
            });
        }
        Ok(())
    }

    /// Joint PAF of a disease from one PAF per risk.
    ///
    /// # Errors
    ///
    /// Returns `PafError::ShapeMismatch` unless `pafs` has one entry per risk,
    /// and `PafError::IndexOutOfRange` for a disease outside the tensor.
    ///
    /// # Example
    ///
    /// ```
    /// use burden_core::types::DiseaseId;
    /// use burden_paf::mediation::MediationTensor;
    ///
    /// let tensor = MediationTensor::zeros(2, 1);
    /// let joint = tensor.joint_paf(&[0.2, 0.5], DiseaseId(0)).unwrap();
    /// assert!((joint - (1.0 - 0.8 * 0.5)).abs() < 1e-15);
    /// ```
    pub fn joint_paf(&self, pafs: &[f64], disease: DiseaseId) -> Result<f64, PafError> {
        self.check_len(pafs.len())?;
        self.check_disease(disease)?;
        let survival: f64 = pafs
            .iter()
            .enumerate()
            .map(|(r, p)| 1.0 - p * self.row_factor_unchecked(r, disease.0))
            .product();
        Ok(1.0 - survival)
    }

    /// Change in joint PAF when `risk`'s PAF is replaced by `shifted`.
    pub fn change(
        &self,
        pafs: &[f64],
        risk: RiskId,
        shifted: f64,
        disease: DiseaseId,
    ) -> Result<f64, PafError> {
        self.check_len(pafs.len())?;
        self.check_risk(risk)?;
        let mut moved = pafs.to_vec();
        moved[risk.0] = shifted;
        Ok(self.joint_paf(&moved, disease)? - self.joint_paf(pafs, disease)?)
    }
}

/// Which single-risk view of the tensor to aggregate with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MediationView {
    /// Mediation-scaled individual PAF.
    #[default]
    Joint,
    /// Unmediated individual PAF.
    NonJoint,
}

/// Full tensor plus the derivative exemptions.
#[derive(Debug, Clone, PartialEq)]
pub struct MediationAggregator {
    tensor: MediationTensor,
    exempt: BTreeSet<RiskId>,
}

impl MediationAggregator {
    /// Creates an aggregator from an explicit tensor.
    pub fn new(tensor: MediationTensor, exempt: impl IntoIterator<Item = RiskId>) -> Self {
        Self {
            tensor,
            exempt: exempt.into_iter().collect(),
        }
    }

    /// Resolves a configuration against a registry.
    pub fn from_config(registry: &Registry, config: &MediationConfig) -> Result<Self, LookupError> {
        let tensor = MediationTensor::from_triples(registry, &config.triples)?;
        let exempt = config
            .derivative_exempt_risks
            .iter()
            .map(|name| registry.risk(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(tensor, exempt))
    }

    /// Full tensor.
    #[inline]
    pub fn tensor(&self) -> &MediationTensor {
        &self.tensor
    }

    /// Whether `risk` skips the mediation factor in the derivative.
    #[inline]
    pub fn is_exempt(&self, risk: RiskId) -> bool {
        self.exempt.contains(&risk)
    }

    /// Joint PAF under the full tensor.
    pub fn joint_paf(&self, pafs: &[f64], disease: DiseaseId) -> Result<f64, PafError> {
        self.tensor.joint_paf(pafs, disease)
    }

    /// Derivative of the joint PAF with respect to one risk.
    ///
    /// `M_r · (1 − D_r)⁻¹ · (1 − M_r·P_r)⁻¹ · (1 − P_r)² · (1 − PAF_J)` with
    /// `M_r = 1` for exempt risks, else the risk's row factor.
    pub fn joint_derivative(
        &self,
        pafs: &[f64],
        derivatives: &[f64],
        risk: RiskId,
        disease: DiseaseId,
    ) -> Result<f64, PafError> {
        self.tensor.check_len(derivatives.len())?;
        self.tensor.check_risk(risk)?;
        let joint = self.joint_paf(pafs, disease)?;
        let m = if self.is_exempt(risk) {
            1.0
        } else {
            self.tensor.row_factor(risk, disease)?
        };
        let p = pafs[risk.0];
        let d = derivatives[risk.0];
        Ok(m / (1.0 - d) / (1.0 - m * p) * (1.0 - p).powi(2) * (1.0 - joint))
    }
}

/// Splits a joint PAF into shares proportional to per-risk PAFs.
///
/// An all-zero or NaN sum gives all zeros.
///
/// # Example
///
/// ```
/// use burden_paf::mediation::proportional_split;
///
/// assert_eq!(proportional_split(&[1.0, 1.0, 2.0], 0.5), vec![0.125, 0.125, 0.25]);
/// assert_eq!(proportional_split(&[0.0, 0.0], 0.4), vec![0.0, 0.0]);
/// ```
pub fn proportional_split(individual: &[f64], joint: f64) -> Vec<f64> {
    let total: f64 = individual.iter().sum();
    if total == 0.0 || total.is_nan() {
        return vec![0.0; individual.len()];
    }
    individual.iter().map(|p| p * (joint / total)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn registry() -> Registry {
        Registry::gbd_diet()
    }

    fn ids(reg: &Registry, risk: &str, disease: &str) -> (RiskId, DiseaseId) {
        (reg.risk(risk).unwrap(), reg.disease(disease).unwrap())
    }

    #[test]
    fn test_default_triples_resolve() {
        let reg = registry();
        let agg = MediationAggregator::from_config(&reg, &MediationConfig::default()).unwrap();
        let (milk, crc) = ids(&reg, "Diet low in milk", "Colon and rectum cancer");
        let calcium = reg.risk("Diet low in calcium").unwrap();
        assert_eq!(agg.tensor().get(milk, calcium, crc).unwrap(), 1.0);
        assert_eq!(agg.tensor().row_factor(milk, crc).unwrap(), 0.0);
        assert!(agg.is_exempt(milk));
        assert!(!agg.is_exempt(calcium));
    }

    #[test]
    fn test_unknown_triple_name_fails() {
        let config = MediationConfig {
            triples: vec![MediationTriple::new("Diet low in kale", "Diet low in fiber", "Gout", 1.0)],
            derivative_exempt_risks: Vec::new(),
        };
        assert!(MediationAggregator::from_config(&registry(), &config).is_err());
    }

    #[test]
    fn test_zero_tensor_single_risk_reduces_to_paf() {
        let tensor = MediationTensor::zeros(3, 2);
        let joint = tensor.joint_paf(&[0.0, 0.37, 0.0], DiseaseId(1)).unwrap();
        assert_relative_eq!(joint, 0.37, max_relative = 1e-15);
    }

    #[test]
    fn test_mediated_risk_dropped() {
        let mut tensor = MediationTensor::zeros(2, 1);
        tensor.set(RiskId(0), RiskId(1), DiseaseId(0), 1.0).unwrap();
        let joint = tensor.joint_paf(&[0.3, 0.2], DiseaseId(0)).unwrap();
        assert_relative_eq!(joint, 0.2, max_relative = 1e-15);
    }

    #[test]
    fn test_non_joint_view_isolates_risk() {
        let reg = registry();
        let agg = MediationAggregator::from_config(&reg, &MediationConfig::default()).unwrap();
        let (milk, crc) = ids(&reg, "Diet low in milk", "Colon and rectum cancer");
        let pafs: Vec<f64> = (0..15).map(|i| 0.01 * (i + 1) as f64).collect();
        let view = agg.tensor().non_joint_view(milk).unwrap();
        assert_relative_eq!(view.joint_paf(&pafs, crc).unwrap(), pafs[milk.0], max_relative = 1e-14);
    }

    #[test]
    fn test_joint_view_applies_row_factor() {
        let reg = registry();
        let agg = MediationAggregator::from_config(&reg, &MediationConfig::default()).unwrap();
        let (milk, crc) = ids(&reg, "Diet low in milk", "Colon and rectum cancer");
        let (fruits, ihd) = ids(&reg, "Diet low in fruits", "Ischemic heart disease");
        let pafs = vec![0.1; 15];
        // milk fully mediated for colon cancer, fruits unmediated for IHD
        assert_eq!(agg.tensor().joint_view(milk).unwrap().joint_paf(&pafs, crc).unwrap(), 0.0);
        assert_relative_eq!(
            agg.tensor().view(MediationView::Joint, fruits).unwrap().joint_paf(&pafs, ihd).unwrap(),
            0.1,
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_change_is_shifted_minus_unshifted() {
        let tensor = MediationTensor::zeros(2, 1);
        let pafs = [0.2, 0.5];
        let change = tensor.change(&pafs, RiskId(0), 0.1, DiseaseId(0)).unwrap();
        let expected = (1.0 - 0.9 * 0.5) - (1.0 - 0.8 * 0.5);
        assert_relative_eq!(change, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_shape_mismatch() {
        let tensor = MediationTensor::zeros(3, 1);
        assert!(matches!(
            tensor.joint_paf(&[0.1], DiseaseId(0)),
            Err(PafError::ShapeMismatch { expected: 3, got: 1 })
        ));
    }

    #[test]
    fn test_ids_outside_tensor_are_errors() {
        let mut tensor = MediationTensor::zeros(2, 2);
        let out_of_range = |axis, index, size| {
            Err::<f64, _>(PafError::IndexOutOfRange { axis, index, size })
        };
        assert_eq!(tensor.joint_paf(&[0.1, 0.2], DiseaseId(3)), out_of_range("disease", 3, 2));
        assert_eq!(tensor.change(&[0.1, 0.2], RiskId(2), 0.3, DiseaseId(0)), out_of_range("risk", 2, 2));
        assert_eq!(tensor.get(RiskId(0), RiskId(4), DiseaseId(0)), out_of_range("risk", 4, 2));
        assert!(tensor.set(RiskId(0), RiskId(0), DiseaseId(2), 1.0).is_err());
        assert!(tensor.non_joint_view(RiskId(2)).is_err());
        assert!(tensor.joint_view(RiskId(9)).is_err());

        let agg = MediationAggregator::new(MediationTensor::zeros(2, 1), Vec::new());
        assert_eq!(
            agg.joint_derivative(&[0.1, 0.2], &[0.3, 0.4], RiskId(5), DiseaseId(0)),
            out_of_range("risk", 5, 2)
        );
        assert_eq!(
            agg.joint_derivative(&[0.1, 0.2], &[0.3, 0.4], RiskId(0), DiseaseId(1)),
            out_of_range("disease", 1, 1)
        );
    }

    #[test]
    fn test_joint_derivative_formula() {
        let mut tensor = MediationTensor::zeros(2, 1);
        tensor.set(RiskId(1), RiskId(0), DiseaseId(0), 0.5).unwrap();
        let agg = MediationAggregator::new(tensor, Vec::new());
        let pafs = [0.2, 0.4];
        let ders = [0.3, 0.6];
        let joint = 1.0 - (1.0 - 0.2) * (1.0 - 0.4 * 0.5);
        let expected = 0.5 / (1.0 - 0.6) / (1.0 - 0.5 * 0.4) * 0.6f64.powi(2) * (1.0 - joint);
        let got = agg.joint_derivative(&pafs, &ders, RiskId(1), DiseaseId(0)).unwrap();
        assert_relative_eq!(got, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_exempt_risk_skips_row_factor() {
        let mut tensor = MediationTensor::zeros(2, 1);
        tensor.set(RiskId(1), RiskId(0), DiseaseId(0), 0.5).unwrap();
        let agg = MediationAggregator::new(tensor, [RiskId(1)]);
        let pafs = [0.2, 0.4];
        let ders = [0.3, 0.6];
        let joint = agg.joint_paf(&pafs, DiseaseId(0)).unwrap();
        let expected = 1.0 / 0.4 / 0.6 * 0.36 * (1.0 - joint);
        let got = agg.joint_derivative(&pafs, &ders, RiskId(1), DiseaseId(0)).unwrap();
        assert_relative_eq!(got, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_proportional_split_sums_to_joint() {
        let shares = proportional_split(&[0.1, 0.2, 0.3], 0.5);
        assert_relative_eq!(shares.iter().sum::<f64>(), 0.5, max_relative = 1e-14);
        assert_eq!(proportional_split(&[f64::NAN, 1.0], 0.5), vec![0.0, 0.0]);
    }
}
