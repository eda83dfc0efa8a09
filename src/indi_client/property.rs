use indi::{
    Number, NumberVector, Parameter, PropertyPerm, PropertyState, Switch, SwitchRule, SwitchState,
    SwitchVector, Text, TextVector,
};

pub fn switch_state(on: bool) -> SwitchState {
    if on {
        SwitchState::On
    } else {
        SwitchState::Off
    }
}

/// `members` are `(name, label, on)`
pub fn new_switch_vector(
    name: &str,
    label: &str,
    rule: SwitchRule,
    members: &[(&str, &str, bool)],
) -> SwitchVector {
    SwitchVector {
        name: name.to_string(),
        group: None,
        label: Some(label.to_string()),
        state: PropertyState::Idle,
        perm: PropertyPerm::RW,
        rule,
        timeout: None,
        timestamp: None,
        values: members
            .iter()
            .map(|(name, label, on)| {
                (
                    name.to_string(),
                    Switch {
                        label: Some(label.to_string()),
                        value: switch_state(*on),
                    },
                )
            })
            .collect(),
    }
}

/// `members` are `(name, min, max, value)`
pub fn new_number_vector(
    name: &str,
    label: &str,
    members: &[(&str, f64, f64, f64)],
) -> NumberVector {
    NumberVector {
        name: name.to_string(),
        group: None,
        label: Some(label.to_string()),
        state: PropertyState::Idle,
        perm: PropertyPerm::RW,
        timeout: None,
        timestamp: None,
        values: members
            .iter()
            .map(|(name, min, max, value)| {
                (
                    name.to_string(),
                    Number {
                        label: Some(name.to_string()),
                        format: "%010.6m".to_string(),
                        min: *min,
                        max: *max,
                        step: 0.,
                        value: (*value).into(),
                    },
                )
            })
            .collect(),
    }
}

/// Read-only text vector; `members` are `(name, text)`
pub fn new_text_vector(name: &str, label: &str, members: &[(&str, &str)]) -> TextVector {
    TextVector {
        name: name.to_string(),
        group: None,
        label: Some(label.to_string()),
        state: PropertyState::Idle,
        perm: PropertyPerm::RO,
        timeout: None,
        timestamp: None,
        values: members
            .iter()
            .map(|(name, text)| {
                (
                    name.to_string(),
                    Text {
                        label: Some(name.to_string()),
                        value: text.to_string(),
                    },
                )
            })
            .collect(),
    }
}

/// A parameter together with the device it belongs to. `indi` keeps the
/// device name on the device rather than on each parameter.
#[derive(Debug, Clone)]
pub struct Property {
    device: String,
    name: String,
    parameter: Parameter,
}

impl Property {
    pub fn switch(device: &str, svp: SwitchVector) -> Self {
        Property {
            device: device.to_string(),
            name: svp.name.clone(),
            parameter: Parameter::SwitchVector(svp),
        }
    }

    pub fn number(device: &str, nvp: NumberVector) -> Self {
        Property {
            device: device.to_string(),
            name: nvp.name.clone(),
            parameter: Parameter::NumberVector(nvp),
        }
    }

    pub fn text(device: &str, tvp: TextVector) -> Self {
        Property {
            device: device.to_string(),
            name: tvp.name.clone(),
            parameter: Parameter::TextVector(tvp),
        }
    }

    pub fn device_name(&self) -> &str {
        &self.device
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_name_match(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn as_switch(&self) -> Option<&SwitchVector> {
        match &self.parameter {
            Parameter::SwitchVector(svp) => Some(svp),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&NumberVector> {
        match &self.parameter {
            Parameter::NumberVector(nvp) => Some(nvp),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextVector> {
        match &self.parameter {
            Parameter::TextVector(tvp) => Some(tvp),
            _ => None,
        }
    }

    pub fn into_switch(self) -> Option<SwitchVector> {
        match self.parameter {
            Parameter::SwitchVector(svp) => Some(svp),
            _ => None,
        }
    }

    pub fn into_number(self) -> Option<NumberVector> {
        match self.parameter {
            Parameter::NumberVector(nvp) => Some(nvp),
            _ => None,
        }
    }
}

/// Member lookups on a switch vector.
///
/// `indi` keys members by name, so "the member at index i" means the i-th
/// member in ascending name order.
pub trait SwitchVectorExt {
    fn member_names(&self) -> Vec<&str>;

    fn has_member(&self, member: &str) -> bool;

    fn is_on(&self, member: &str) -> bool;

    /// Sets one member, leaving the others alone. False if there is no such member.
    fn set_member(&mut self, member: &str, on: bool) -> bool;

    /// Turns every member off
    fn reset(&mut self);

    /// Turns `member` on and every other member off.
    /// Returns false, leaving the vector untouched, if there is no such member.
    fn select(&mut self, member: &str) -> bool;

    fn on_index(&self) -> Option<usize>;

    fn select_index(&mut self, index: usize) -> bool;
}

impl SwitchVectorExt for SwitchVector {
    fn member_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn has_member(&self, member: &str) -> bool {
        self.values.contains_key(member)
    }

    fn is_on(&self, member: &str) -> bool {
        self.values
            .get(member)
            .map_or(false, |s| matches!(s.value, SwitchState::On))
    }

    fn set_member(&mut self, member: &str, on: bool) -> bool {
        match self.values.get_mut(member) {
            Some(s) => {
                s.value = switch_state(on);
                true
            }
            None => false,
        }
    }

    fn reset(&mut self) {
        self.values
            .values_mut()
            .for_each(|s| s.value = SwitchState::Off);
    }

    fn select(&mut self, member: &str) -> bool {
        if !self.has_member(member) {
            return false;
        }
        self.reset();
        self.set_member(member, true)
    }

    fn on_index(&self) -> Option<usize> {
        self.member_names()
            .into_iter()
            .position(|name| self.is_on(name))
    }

    fn select_index(&mut self, index: usize) -> bool {
        let member = match self.member_names().get(index) {
            Some(name) => name.to_string(),
            None => return false,
        };
        self.select(&member)
    }
}

pub trait NumberVectorExt {
    fn value(&self, member: &str) -> Option<f64>;

    /// False if there is no such member
    fn set_value(&mut self, member: &str, value: f64) -> bool;
}

impl NumberVectorExt for NumberVector {
    fn value(&self, member: &str) -> Option<f64> {
        self.values.get(member).map(|n| f64::from(n.value.clone()))
    }

    fn set_value(&mut self, member: &str, value: f64) -> bool {
        match self.values.get_mut(member) {
            Some(n) => {
                n.value = value.into();
                true
            }
            None => false,
        }
    }
}
