//! 位置层级分组（园区 → 楼宇 → 楼层）
//!
//! 仅用于展示和批量导出，不持久化。
//! 分组保持首次出现的顺序，每个楼层内的控制器保持原始顺序。

use crate::models::ControllerData;

pub const UNKNOWN_CAMPUS: &str = "Unknown Campus";
pub const UNKNOWN_BUILDING: &str = "Unknown Building";
pub const UNKNOWN_FLOOR: &str = "Unknown Floor";

/// 位置字段的展示名：空白时使用占位名。
pub fn location_label<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

/// 展示名还原为存储值：占位名对应空字段。
pub fn stored_location<'a>(label: &'a str, placeholder: &str) -> &'a str {
    if label == placeholder { "" } else { label }
}

/// 批量导出的分区名称：`园区[ - 楼宇[ - 楼层]]`。
pub fn section_name(campus: &str, building: Option<&str>, floor: Option<&str>) -> String {
    let mut name = campus.to_string();
    if let Some(building) = building {
        name.push_str(" - ");
        name.push_str(building);
        if let Some(floor) = floor {
            name.push_str(" - ");
            name.push_str(floor);
        }
    }
    name
}

#[derive(Debug, Clone)]
pub struct FloorGroup<'a> {
    pub name: String,
    pub controllers: Vec<&'a ControllerData>,
}

#[derive(Debug, Clone)]
pub struct BuildingGroup<'a> {
    pub name: String,
    pub floors: Vec<FloorGroup<'a>>,
}

impl<'a> BuildingGroup<'a> {
    pub fn controllers(&self) -> impl Iterator<Item = &'a ControllerData> {
        self.floors
            .iter()
            .flat_map(|floor| floor.controllers.iter().copied())
    }

    pub fn floor(&self, name: &str) -> Option<&FloorGroup<'a>> {
        self.floors.iter().find(|floor| floor.name == name)
    }
}

#[derive(Debug, Clone)]
pub struct CampusGroup<'a> {
    pub name: String,
    pub buildings: Vec<BuildingGroup<'a>>,
}

impl<'a> CampusGroup<'a> {
    pub fn controllers(&self) -> impl Iterator<Item = &'a ControllerData> {
        self.buildings
            .iter()
            .flat_map(|building| building.controllers())
    }

    pub fn building(&self, name: &str) -> Option<&BuildingGroup<'a>> {
        self.buildings.iter().find(|building| building.name == name)
    }
}

/// 分组结果。
#[derive(Debug, Clone, Default)]
pub struct Hierarchy<'a> {
    pub campuses: Vec<CampusGroup<'a>>,
}

impl<'a> Hierarchy<'a> {
    pub fn campus(&self, name: &str) -> Option<&CampusGroup<'a>> {
        self.campuses.iter().find(|campus| campus.name == name)
    }

    pub fn controller_count(&self) -> usize {
        self.campuses
            .iter()
            .map(|campus| campus.controllers().count())
            .sum()
    }

    /// 取某个分区下的控制器（名称按展示名匹配，含占位名）。
    ///
    /// 指定楼层时必须同时指定楼宇；分区不存在时返回空列表。
    pub fn section(
        &self,
        campus: &str,
        building: Option<&str>,
        floor: Option<&str>,
    ) -> Vec<&'a ControllerData> {
        let Some(campus) = self.campus(campus) else {
            return Vec::new();
        };
        let Some(building_name) = building else {
            return campus.controllers().collect();
        };
        let Some(building) = campus.building(building_name) else {
            return Vec::new();
        };
        match floor {
            None => building.controllers().collect(),
            Some(floor_name) => building
                .floor(floor_name)
                .map(|floor| floor.controllers.clone())
                .unwrap_or_default(),
        }
    }
}

/// 按园区 / 楼宇 / 楼层分组。
pub fn group_by_location(controllers: &[ControllerData]) -> Hierarchy<'_> {
    let mut hierarchy = Hierarchy::default();
    for controller in controllers {
        let campus_name = location_label(&controller.campus, UNKNOWN_CAMPUS);
        let building_name = location_label(&controller.building, UNKNOWN_BUILDING);
        let floor_name = location_label(&controller.floor, UNKNOWN_FLOOR);

        let campus = match hierarchy
            .campuses
            .iter()
            .position(|campus| campus.name == campus_name)
        {
            Some(idx) => &mut hierarchy.campuses[idx],
            None => {
                hierarchy.campuses.push(CampusGroup {
                    name: campus_name.to_string(),
                    buildings: Vec::new(),
                });
                let last = hierarchy.campuses.len() - 1;
                &mut hierarchy.campuses[last]
            }
        };
        let building = match campus
            .buildings
            .iter()
            .position(|building| building.name == building_name)
        {
            Some(idx) => &mut campus.buildings[idx],
            None => {
                campus.buildings.push(BuildingGroup {
                    name: building_name.to_string(),
                    floors: Vec::new(),
                });
                let last = campus.buildings.len() - 1;
                &mut campus.buildings[last]
            }
        };
        match building
            .floors
            .iter_mut()
            .find(|floor| floor.name == floor_name)
        {
            Some(floor) => floor.controllers.push(controller),
            None => building.floors.push(FloorGroup {
                name: floor_name.to_string(),
                controllers: vec![controller],
            }),
        }
    }
    hierarchy
}
