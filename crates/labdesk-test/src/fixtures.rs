//! Sample documents taken from the dashboard's demo data.

use serde_json::{Value, json};

/// Equipment list as served by `GET /equipment`.
pub fn equipment() -> Value {
    json!([
        {
            "id": "EQ001",
            "name": "Microscope XR-500",
            "status": "Online",
            "lastMaintenance": "2024-03-01",
            "nextMaintenance": "2024-04-01",
            "usage": 75,
            "temperature": 23.5,
            "location": "Lab Room A"
        },
        {
            "id": "EQ002",
            "name": "Centrifuge CT-200",
            "status": "In Use",
            "lastMaintenance": "2024-02-15",
            "nextMaintenance": "2024-03-15",
            "usage": 45,
            "temperature": 22.1,
            "location": "Lab Room B"
        }
    ])
}

/// Experiment list as served by `GET /experiments`.
pub fn experiments() -> Value {
    json!([
        {
            "id": "EXP001",
            "name": "Temperature Sensitivity Analysis",
            "status": "Running",
            "startDate": "2024-03-15",
            "researcher": "John Smith",
            "progress": 68
        },
        {
            "id": "EXP002",
            "name": "Catalyst Efficiency Test",
            "status": "Completed",
            "startDate": "2024-03-10",
            "researcher": "Emma Davis",
            "progress": 100
        }
    ])
}

/// A new experiment as submitted with `POST /experiments`.
pub fn new_experiment() -> Value {
    json!({
        "name": "Protein Analysis #127",
        "status": "Planned",
        "startDate": "2024-03-20",
        "researcher": "Dr. Smith"
    })
}

/// A workflow editor graph for the main data pipeline.
pub fn pipeline_flow() -> Value {
    json!({
        "name": "main_data_pipeline",
        "nodes": [
            {
                "id": "extract_postgres",
                "type": "extract_from_postgres",
                "position": {"x": 0, "y": 0},
                "data": {"parameters": {"query": "SELECT * FROM source_table"}}
            },
            {
                "id": "extract_s3",
                "type": "extract_from_s3",
                "position": {"x": 0, "y": 120},
                "data": {"parameters": {"key": "raw_data/latest.parquet"}}
            },
            {
                "id": "clean",
                "type": "clean_data",
                "data": {"parameters": {}}
            },
            {
                "id": "validate",
                "type": "validate_data_quality",
                "data": {"parameters": {"expectations_suite": "production_suite"}}
            }
        ],
        "edges": [
            {"id": "e1", "source": "extract_postgres", "target": "clean"},
            {"id": "e2", "source": "extract_s3", "target": "clean"},
            {"id": "e3", "source": "clean", "target": "validate"}
        ]
    })
}
